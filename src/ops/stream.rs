//! Operations on streams.
//!
//! Stream entry field names go through the key serializer and field values
//! through the value serializer, like hash fields and values do.

use std::fmt;
use std::time::Duration;

use bytes::Bytes;

use crate::client::{Error, ErrorKind};
use crate::connector::Connector;
use crate::resp::{Command, TypeError, Value};
use crate::serializer::{Deserializer, Serializer};
use crate::template::Template;

/// View over the stream commands.
///
/// Obtained from [`Template::stream_ops`](crate::Template::stream_ops).
#[derive(Debug)]
pub struct StreamOps<'a, KS, VS, C: Connector> {
    template: &'a Template<KS, VS, C>,
}

/// [`StreamOps`](StreamOps) narrowed to one fixed key.
///
/// Reads are the special case of key binding: the underlying commands take a
/// list of (key, offset) pairs, so [`xread`](Self::xread) wraps the bound key
/// together with the caller's offset into that composite form before
/// forwarding.
#[derive(Debug)]
pub struct BoundStreamOps<'a, K: ?Sized, KS, VS, C: Connector> {
    ops: StreamOps<'a, KS, VS, C>,
    key: &'a K,
}

/// Identifier of one stream entry: a millisecond timestamp plus a sequence
/// number distinguishing entries of the same millisecond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StreamId {
    pub millis: u64,
    pub sequence: u64,
}

/// Where a stream read starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOffset {
    /// Only entries arriving after the read started (`$`).
    Latest,
    /// Entries never delivered to any consumer of the group (`>`).
    /// Only meaningful inside [`xread_group`](StreamOps::xread_group).
    LastConsumed,
    /// Entries after the given id, exclusive.
    From(StreamId),
}

/// End point of a range scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeBound {
    /// The lowest id in the stream (`-`).
    Min,
    /// The highest id in the stream (`+`).
    Max,
    /// An explicit id, inclusive.
    Id(StreamId),
}

/// Length-based trim policy (`MAXLEN`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamTrim {
    pub max_len: u64,
    /// Let the server round the cut to a node boundary (`~`), which is
    /// considerably cheaper.
    pub approximate: bool,
}

/// One stream entry with its decoded fields.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamEntry<F, V> {
    pub id: StreamId,
    pub fields: Vec<(F, V)>,
}

/// Reply of [`xpending_summary`](StreamOps::xpending_summary).
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSummary {
    /// Total number of pending entries in the group.
    pub count: u64,
    pub min_id: Option<StreamId>,
    pub max_id: Option<StreamId>,
    /// Pending count per consumer.
    pub consumers: Vec<(String, u64)>,
}

/// One row of a detailed [`xpending`](StreamOps::xpending) listing.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingEntry {
    pub id: StreamId,
    pub consumer: String,
    /// Time since the entry was last delivered.
    pub idle: Duration,
    pub deliveries: u64,
}

impl StreamId {
    pub fn new(millis: u64, sequence: u64) -> Self {
        StreamId { millis, sequence }
    }

    fn parse(raw: &[u8]) -> Option<Self> {
        let raw = std::str::from_utf8(raw).ok()?;
        match raw.split_once('-') {
            Some((millis, sequence)) => Some(StreamId {
                millis: millis.parse().ok()?,
                sequence: sequence.parse().ok()?,
            }),
            None => Some(StreamId {
                millis: raw.parse().ok()?,
                sequence: 0,
            }),
        }
    }

    fn from_value(value: Value) -> Result<Self, Error> {
        let raw = value.into_blob()?;
        StreamId::parse(&raw).ok_or_else(|| {
            TypeError::other("stream id", String::from_utf8_lossy(&raw).into_owned()).into()
        })
    }
}

impl fmt::Display for StreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.millis, self.sequence)
    }
}

impl ReadOffset {
    fn push(self, cmd: &mut Command) {
        match self {
            ReadOffset::Latest => cmd.arg_static("$"),
            ReadOffset::LastConsumed => cmd.arg_static(">"),
            ReadOffset::From(id) => cmd.arg_str(&id.to_string()),
        };
    }
}

impl RangeBound {
    fn push(self, cmd: &mut Command) {
        match self {
            RangeBound::Min => cmd.arg_static("-"),
            RangeBound::Max => cmd.arg_static("+"),
            RangeBound::Id(id) => cmd.arg_str(&id.to_string()),
        };
    }
}

impl StreamTrim {
    fn push(self, cmd: &mut Command) {
        cmd.arg_static("MAXLEN");
        if self.approximate {
            cmd.arg_static("~");
        }
        cmd.arg_uint(self.max_len);
    }
}

impl<'a, KS, VS, C: Connector> StreamOps<'a, KS, VS, C> {
    pub(crate) fn new(template: &'a Template<KS, VS, C>) -> Self {
        StreamOps { template }
    }

    /// <https://redis.io/commands/xadd> with a server-assigned id.
    ///
    /// ```
    /// # helper::with_template(|template| async move {
    /// # let key = "doctest_stream_xadd_1";
    /// # template.del(&[key]).await?;
    /// let ops = template.stream_ops();
    /// let id = ops.xadd(key, &[("sensor", "1"), ("reading", "25.3")]).await?;
    /// let res = ops.xlen(key).await?;
    /// assert_eq!(1, res);
    /// let entries: Vec<typered::ops::StreamEntry<String, String>> = ops
    ///     .xrange(
    ///         key,
    ///         typered::ops::RangeBound::Min,
    ///         typered::ops::RangeBound::Max,
    ///         None,
    ///     )
    ///     .await?;
    /// assert_eq!(id, entries[0].id);
    /// assert_eq!(2, entries[0].fields.len());
    /// # Ok(())})?; Ok::<(), helper::BoxError>(())
    /// ```
    pub async fn xadd<K: ?Sized, F, V>(&self, key: &K, fields: &[(F, V)]) -> Result<StreamId, Error>
    where
        KS: Serializer<K> + Serializer<F>,
        VS: Serializer<V>,
    {
        self.xadd_with(key, None, None, fields).await
    }

    /// <https://redis.io/commands/xadd> with an explicit id and/or trim.
    ///
    /// `id: None` lets the server assign the id.
    pub async fn xadd_with<K: ?Sized, F, V>(
        &self,
        key: &K,
        id: Option<StreamId>,
        trim: Option<StreamTrim>,
        fields: &[(F, V)],
    ) -> Result<StreamId, Error>
    where
        KS: Serializer<K> + Serializer<F>,
        VS: Serializer<V>,
    {
        if fields.is_empty() {
            return Err(ErrorKind::InvalidArgument("xadd requires at least one field").into());
        }
        let mut cmd = Command::new("XADD");
        cmd.arg(self.template.raw_key(key)?);
        if let Some(trim) = trim {
            trim.push(&mut cmd);
        }
        match id {
            Some(id) => cmd.arg_str(&id.to_string()),
            None => cmd.arg_static("*"),
        };
        for (field, value) in fields {
            cmd.arg(self.template.raw_key(field)?)
                .arg(self.template.raw_value(value)?);
        }
        StreamId::from_value(self.template.execute(&cmd).await?)
    }

    /// <https://redis.io/commands/xlen>
    pub async fn xlen<K: ?Sized>(&self, key: &K) -> Result<usize, Error>
    where
        KS: Serializer<K>,
    {
        let mut cmd = Command::new("XLEN");
        cmd.arg(self.template.raw_key(key)?);
        Ok(self.template.execute(&cmd).await?.into_integer()? as usize)
    }

    /// <https://redis.io/commands/xrange>
    pub async fn xrange<K: ?Sized, F, V>(
        &self,
        key: &K,
        start: RangeBound,
        end: RangeBound,
        count: Option<usize>,
    ) -> Result<Vec<StreamEntry<F, V>>, Error>
    where
        KS: Serializer<K> + Deserializer<F>,
        VS: Deserializer<V>,
    {
        let mut cmd = Command::new("XRANGE");
        cmd.arg(self.template.raw_key(key)?);
        start.push(&mut cmd);
        end.push(&mut cmd);
        if let Some(count) = count {
            cmd.arg_static("COUNT").arg_uint(count as u64);
        }
        self.entries(self.template.execute(&cmd).await?.into_array()?)
    }

    /// <https://redis.io/commands/xrevrange>
    ///
    /// Entries come back newest first; note the reversed bound order, as in
    /// the underlying command.
    pub async fn xrevrange<K: ?Sized, F, V>(
        &self,
        key: &K,
        end: RangeBound,
        start: RangeBound,
        count: Option<usize>,
    ) -> Result<Vec<StreamEntry<F, V>>, Error>
    where
        KS: Serializer<K> + Deserializer<F>,
        VS: Deserializer<V>,
    {
        let mut cmd = Command::new("XREVRANGE");
        cmd.arg(self.template.raw_key(key)?);
        end.push(&mut cmd);
        start.push(&mut cmd);
        if let Some(count) = count {
            cmd.arg_static("COUNT").arg_uint(count as u64);
        }
        self.entries(self.template.execute(&cmd).await?.into_array()?)
    }

    /// <https://redis.io/commands/xread>
    ///
    /// Reads from several streams at once; the reply groups entries by
    /// stream key. `block: Some(..)` waits up to that long for new entries
    /// and holds the pooled connection while doing so.
    pub async fn xread<K: ?Sized, R, F, V>(
        &self,
        streams: &[(&K, ReadOffset)],
        count: Option<usize>,
        block: Option<Duration>,
    ) -> Result<Vec<(R, Vec<StreamEntry<F, V>>)>, Error>
    where
        KS: Serializer<K> + Deserializer<R> + Deserializer<F>,
        VS: Deserializer<V>,
    {
        let raw = self.read_inner(None, false, streams, count, block).await?;
        raw.into_iter()
            .map(|(name, entries)| Ok((self.template.read_key(&name)?, entries)))
            .collect()
    }

    /// <https://redis.io/commands/xreadgroup>
    ///
    /// Like [`xread`](Self::xread), but entries are delivered through a
    /// consumer group and tracked as pending until acknowledged. With
    /// `noack` the server skips the pending tracking.
    pub async fn xread_group<K: ?Sized, R, F, V>(
        &self,
        group: &str,
        consumer: &str,
        streams: &[(&K, ReadOffset)],
        count: Option<usize>,
        block: Option<Duration>,
        noack: bool,
    ) -> Result<Vec<(R, Vec<StreamEntry<F, V>>)>, Error>
    where
        KS: Serializer<K> + Deserializer<R> + Deserializer<F>,
        VS: Deserializer<V>,
    {
        let raw = self
            .read_inner(Some((group, consumer)), noack, streams, count, block)
            .await?;
        raw.into_iter()
            .map(|(name, entries)| Ok((self.template.read_key(&name)?, entries)))
            .collect()
    }

    pub(crate) async fn read_inner<K: ?Sized, F, V>(
        &self,
        group: Option<(&str, &str)>,
        noack: bool,
        streams: &[(&K, ReadOffset)],
        count: Option<usize>,
        block: Option<Duration>,
    ) -> Result<Vec<(Bytes, Vec<StreamEntry<F, V>>)>, Error>
    where
        KS: Serializer<K> + Deserializer<F>,
        VS: Deserializer<V>,
    {
        if streams.is_empty() {
            return Err(ErrorKind::InvalidArgument("read requires at least one stream").into());
        }
        let mut cmd = match group {
            Some((group, consumer)) => {
                let mut cmd = Command::new("XREADGROUP");
                cmd.arg_static("GROUP").arg_str(group).arg_str(consumer);
                cmd
            }
            None => Command::new("XREAD"),
        };
        if let Some(count) = count {
            cmd.arg_static("COUNT").arg_uint(count as u64);
        }
        if let Some(block) = block {
            cmd.arg_static("BLOCK").arg_uint(block.as_millis() as u64);
        }
        if noack {
            cmd.arg_static("NOACK");
        }
        cmd.arg_static("STREAMS");
        for (key, _) in streams {
            cmd.arg(self.template.raw_key(*key)?);
        }
        for (_, offset) in streams {
            offset.push(&mut cmd);
        }

        let reply = self.template.execute(&cmd).await?;
        if reply.is_null() {
            return Ok(vec![]);
        }
        reply
            .into_pairs()?
            .into_iter()
            .map(|(name, entries)| {
                let entries = self.entries(entries.into_array()?)?;
                Ok((Bytes::copy_from_slice(name.as_ref()), entries))
            })
            .collect()
    }

    /// <https://redis.io/commands/xdel>
    pub async fn xdel<K: ?Sized>(&self, key: &K, ids: &[StreamId]) -> Result<usize, Error>
    where
        KS: Serializer<K>,
    {
        if ids.is_empty() {
            return Ok(0);
        }
        let mut cmd = Command::new("XDEL");
        cmd.arg(self.template.raw_key(key)?);
        for id in ids {
            cmd.arg_str(&id.to_string());
        }
        Ok(self.template.execute(&cmd).await?.into_integer()? as usize)
    }

    /// <https://redis.io/commands/xtrim>
    ///
    /// Returns the number of entries removed.
    pub async fn xtrim<K: ?Sized>(&self, key: &K, trim: StreamTrim) -> Result<usize, Error>
    where
        KS: Serializer<K>,
    {
        let mut cmd = Command::new("XTRIM");
        cmd.arg(self.template.raw_key(key)?);
        trim.push(&mut cmd);
        Ok(self.template.execute(&cmd).await?.into_integer()? as usize)
    }

    /// <https://redis.io/commands/xgroup-create>
    ///
    /// `offset` picks where the group starts consuming;
    /// [`ReadOffset::LastConsumed`] is not meaningful here. With `mkstream`
    /// the stream is created if it does not exist yet.
    pub async fn xgroup_create<K: ?Sized>(
        &self,
        key: &K,
        group: &str,
        offset: ReadOffset,
        mkstream: bool,
    ) -> Result<(), Error>
    where
        KS: Serializer<K>,
    {
        let mut cmd = Command::new("XGROUP");
        cmd.arg_static("CREATE").arg(self.template.raw_key(key)?);
        cmd.arg_str(group);
        offset.push(&mut cmd);
        if mkstream {
            cmd.arg_static("MKSTREAM");
        }
        self.template.execute(&cmd).await?.into_ok().map_err(Into::into)
    }

    /// <https://redis.io/commands/xgroup-destroy>
    ///
    /// Returns whether the group existed.
    pub async fn xgroup_destroy<K: ?Sized>(&self, key: &K, group: &str) -> Result<bool, Error>
    where
        KS: Serializer<K>,
    {
        let mut cmd = Command::new("XGROUP");
        cmd.arg_static("DESTROY")
            .arg(self.template.raw_key(key)?)
            .arg_str(group);
        self.template.execute(&cmd).await?.into_bool().map_err(Into::into)
    }

    /// <https://redis.io/commands/xgroup-delconsumer>
    ///
    /// Returns how many pending entries the consumer still had.
    pub async fn xgroup_delconsumer<K: ?Sized>(
        &self,
        key: &K,
        group: &str,
        consumer: &str,
    ) -> Result<u64, Error>
    where
        KS: Serializer<K>,
    {
        let mut cmd = Command::new("XGROUP");
        cmd.arg_static("DELCONSUMER")
            .arg(self.template.raw_key(key)?)
            .arg_str(group)
            .arg_str(consumer);
        Ok(self.template.execute(&cmd).await?.into_integer()? as u64)
    }

    /// <https://redis.io/commands/xack>
    ///
    /// Returns how many of the ids were actually pending.
    pub async fn xack<K: ?Sized>(
        &self,
        key: &K,
        group: &str,
        ids: &[StreamId],
    ) -> Result<usize, Error>
    where
        KS: Serializer<K>,
    {
        if ids.is_empty() {
            return Ok(0);
        }
        let mut cmd = Command::new("XACK");
        cmd.arg(self.template.raw_key(key)?).arg_str(group);
        for id in ids {
            cmd.arg_str(&id.to_string());
        }
        Ok(self.template.execute(&cmd).await?.into_integer()? as usize)
    }

    /// <https://redis.io/commands/xpending>, summary form.
    pub async fn xpending_summary<K: ?Sized>(
        &self,
        key: &K,
        group: &str,
    ) -> Result<PendingSummary, Error>
    where
        KS: Serializer<K>,
    {
        let mut cmd = Command::new("XPENDING");
        cmd.arg(self.template.raw_key(key)?).arg_str(group);
        let mut parts = self.template.execute(&cmd).await?.into_array()?.into_iter();

        let count = match parts.next() {
            Some(count) => count.into_integer()? as u64,
            None => return Err(TypeError::other("pending summary", "empty array").into()),
        };
        let min_id = match parts.next() {
            Some(Value::Null) | None => None,
            Some(id) => Some(StreamId::from_value(id)?),
        };
        let max_id = match parts.next() {
            Some(Value::Null) | None => None,
            Some(id) => Some(StreamId::from_value(id)?),
        };
        let consumers = match parts.next() {
            Some(Value::Null) | None => vec![],
            Some(consumers) => consumers
                .into_array()?
                .into_iter()
                .map(|row| {
                    let mut row = row.into_array()?.into_iter();
                    match (row.next(), row.next()) {
                        (Some(name), Some(count)) => Ok((
                            String::from_utf8_lossy(&name.into_blob()?).into_owned(),
                            count.into_integer()? as u64,
                        )),
                        _ => Err(TypeError::other("pending consumer", "malformed row").into()),
                    }
                })
                .collect::<Result<_, Error>>()?,
        };

        Ok(PendingSummary {
            count,
            min_id,
            max_id,
            consumers,
        })
    }

    /// <https://redis.io/commands/xpending>, detailed form.
    ///
    /// Lists pending entries in the id range, optionally for one consumer
    /// only.
    pub async fn xpending<K: ?Sized>(
        &self,
        key: &K,
        group: &str,
        start: RangeBound,
        end: RangeBound,
        count: usize,
        consumer: Option<&str>,
    ) -> Result<Vec<PendingEntry>, Error>
    where
        KS: Serializer<K>,
    {
        let mut cmd = Command::new("XPENDING");
        cmd.arg(self.template.raw_key(key)?).arg_str(group);
        start.push(&mut cmd);
        end.push(&mut cmd);
        cmd.arg_uint(count as u64);
        if let Some(consumer) = consumer {
            cmd.arg_str(consumer);
        }
        self.template
            .execute(&cmd)
            .await?
            .into_array()?
            .into_iter()
            .map(|row| {
                let mut row = row.into_array()?.into_iter();
                match (row.next(), row.next(), row.next(), row.next()) {
                    (Some(id), Some(consumer), Some(idle), Some(deliveries)) => Ok(PendingEntry {
                        id: StreamId::from_value(id)?,
                        consumer: String::from_utf8_lossy(&consumer.into_blob()?).into_owned(),
                        idle: Duration::from_millis(idle.into_integer()?.max(0) as u64),
                        deliveries: deliveries.into_integer()? as u64,
                    }),
                    _ => Err(TypeError::other("pending entry", "malformed row").into()),
                }
            })
            .collect()
    }

    /// <https://redis.io/commands/xclaim>
    ///
    /// Transfers ownership of pending entries idle for at least `min_idle`
    /// to `consumer` and returns them.
    pub async fn xclaim<K: ?Sized, F, V>(
        &self,
        key: &K,
        group: &str,
        consumer: &str,
        min_idle: Duration,
        ids: &[StreamId],
    ) -> Result<Vec<StreamEntry<F, V>>, Error>
    where
        KS: Serializer<K> + Deserializer<F>,
        VS: Deserializer<V>,
    {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let mut cmd = Command::new("XCLAIM");
        cmd.arg(self.template.raw_key(key)?)
            .arg_str(group)
            .arg_str(consumer)
            .arg_uint(min_idle.as_millis() as u64);
        for id in ids {
            cmd.arg_str(&id.to_string());
        }
        self.entries(self.template.execute(&cmd).await?.into_array()?)
    }

    /// Decodes a listing of `[id, fields]` entries.
    fn entries<F, V>(&self, items: Vec<Value>) -> Result<Vec<StreamEntry<F, V>>, Error>
    where
        KS: Deserializer<F>,
        VS: Deserializer<V>,
    {
        items
            .into_iter()
            .map(|item| {
                let mut parts = item.into_array()?.into_iter();
                let id = match parts.next() {
                    Some(id) => StreamId::from_value(id)?,
                    None => return Err(TypeError::other("stream entry", "empty array").into()),
                };
                // the field listing is null for entries deleted under a group
                let fields = match parts.next() {
                    Some(Value::Null) | None => vec![],
                    Some(fields) => fields
                        .into_pairs()?
                        .into_iter()
                        .map(|(field, value)| {
                            Ok((
                                self.template.read_key(field.as_ref())?,
                                self.template.read_value(&value.into_blob()?)?,
                            ))
                        })
                        .collect::<Result<_, Error>>()?,
                };
                Ok(StreamEntry { id, fields })
            })
            .collect()
    }
}

impl<'a, K: ?Sized, KS, VS, C: Connector> BoundStreamOps<'a, K, KS, VS, C>
where
    KS: Serializer<K>,
{
    pub(crate) fn new(ops: StreamOps<'a, KS, VS, C>, key: &'a K) -> Self {
        BoundStreamOps { ops, key }
    }

    /// The key every call operates on.
    pub fn key(&self) -> &K {
        self.key
    }

    /// Bound [`xadd`](StreamOps::xadd).
    pub async fn xadd<F, V>(&self, fields: &[(F, V)]) -> Result<StreamId, Error>
    where
        KS: Serializer<F>,
        VS: Serializer<V>,
    {
        self.ops.xadd(self.key, fields).await
    }

    /// Bound [`xadd_with`](StreamOps::xadd_with).
    pub async fn xadd_with<F, V>(
        &self,
        id: Option<StreamId>,
        trim: Option<StreamTrim>,
        fields: &[(F, V)],
    ) -> Result<StreamId, Error>
    where
        KS: Serializer<F>,
        VS: Serializer<V>,
    {
        self.ops.xadd_with(self.key, id, trim, fields).await
    }

    /// Bound [`xlen`](StreamOps::xlen).
    pub async fn xlen(&self) -> Result<usize, Error> {
        self.ops.xlen(self.key).await
    }

    /// Bound [`xrange`](StreamOps::xrange).
    pub async fn xrange<F, V>(
        &self,
        start: RangeBound,
        end: RangeBound,
        count: Option<usize>,
    ) -> Result<Vec<StreamEntry<F, V>>, Error>
    where
        KS: Deserializer<F>,
        VS: Deserializer<V>,
    {
        self.ops.xrange(self.key, start, end, count).await
    }

    /// Bound [`xrevrange`](StreamOps::xrevrange).
    pub async fn xrevrange<F, V>(
        &self,
        end: RangeBound,
        start: RangeBound,
        count: Option<usize>,
    ) -> Result<Vec<StreamEntry<F, V>>, Error>
    where
        KS: Deserializer<F>,
        VS: Deserializer<V>,
    {
        self.ops.xrevrange(self.key, end, start, count).await
    }

    /// Bound read from this stream only.
    ///
    /// Wraps the bound key and `offset` into the composite (key, offset)
    /// list [`xread`](StreamOps::xread) takes and unwraps the single-stream
    /// reply.
    pub async fn xread<F, V>(
        &self,
        offset: ReadOffset,
        count: Option<usize>,
        block: Option<Duration>,
    ) -> Result<Vec<StreamEntry<F, V>>, Error>
    where
        KS: Deserializer<F>,
        VS: Deserializer<V>,
    {
        let raw = self
            .ops
            .read_inner(None, false, &[(self.key, offset)], count, block)
            .await?;
        Ok(raw
            .into_iter()
            .flat_map(|(_, entries)| entries)
            .collect())
    }

    /// Bound [`xread_group`](StreamOps::xread_group), same composite
    /// wrapping as [`xread`](Self::xread).
    pub async fn xread_group<F, V>(
        &self,
        group: &str,
        consumer: &str,
        offset: ReadOffset,
        count: Option<usize>,
        block: Option<Duration>,
        noack: bool,
    ) -> Result<Vec<StreamEntry<F, V>>, Error>
    where
        KS: Deserializer<F>,
        VS: Deserializer<V>,
    {
        let raw = self
            .ops
            .read_inner(
                Some((group, consumer)),
                noack,
                &[(self.key, offset)],
                count,
                block,
            )
            .await?;
        Ok(raw
            .into_iter()
            .flat_map(|(_, entries)| entries)
            .collect())
    }

    /// Bound [`xdel`](StreamOps::xdel).
    pub async fn xdel(&self, ids: &[StreamId]) -> Result<usize, Error> {
        self.ops.xdel(self.key, ids).await
    }

    /// Bound [`xtrim`](StreamOps::xtrim).
    pub async fn xtrim(&self, trim: StreamTrim) -> Result<usize, Error> {
        self.ops.xtrim(self.key, trim).await
    }

    /// Bound [`xgroup_create`](StreamOps::xgroup_create).
    pub async fn xgroup_create(
        &self,
        group: &str,
        offset: ReadOffset,
        mkstream: bool,
    ) -> Result<(), Error> {
        self.ops.xgroup_create(self.key, group, offset, mkstream).await
    }

    /// Bound [`xgroup_destroy`](StreamOps::xgroup_destroy).
    pub async fn xgroup_destroy(&self, group: &str) -> Result<bool, Error> {
        self.ops.xgroup_destroy(self.key, group).await
    }

    /// Bound [`xgroup_delconsumer`](StreamOps::xgroup_delconsumer).
    pub async fn xgroup_delconsumer(&self, group: &str, consumer: &str) -> Result<u64, Error> {
        self.ops.xgroup_delconsumer(self.key, group, consumer).await
    }

    /// Bound [`xack`](StreamOps::xack).
    pub async fn xack(&self, group: &str, ids: &[StreamId]) -> Result<usize, Error> {
        self.ops.xack(self.key, group, ids).await
    }

    /// Bound [`xpending_summary`](StreamOps::xpending_summary).
    pub async fn xpending_summary(&self, group: &str) -> Result<PendingSummary, Error> {
        self.ops.xpending_summary(self.key, group).await
    }

    /// Bound [`xpending`](StreamOps::xpending).
    pub async fn xpending(
        &self,
        group: &str,
        start: RangeBound,
        end: RangeBound,
        count: usize,
        consumer: Option<&str>,
    ) -> Result<Vec<PendingEntry>, Error> {
        self.ops
            .xpending(self.key, group, start, end, count, consumer)
            .await
    }

    /// Bound [`xclaim`](StreamOps::xclaim).
    pub async fn xclaim<F, V>(
        &self,
        group: &str,
        consumer: &str,
        min_idle: Duration,
        ids: &[StreamId],
    ) -> Result<Vec<StreamEntry<F, V>>, Error>
    where
        KS: Deserializer<F>,
        VS: Deserializer<V>,
    {
        self.ops
            .xclaim(self.key, group, consumer, min_idle, ids)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_id_text_round_trip() {
        let id = StreamId::new(1_700_000_000_123, 7);
        assert_eq!("1700000000123-7", id.to_string());
        assert_eq!(Some(id), StreamId::parse(b"1700000000123-7"));
        assert_eq!(Some(StreamId::new(42, 0)), StreamId::parse(b"42"));
        assert_eq!(None, StreamId::parse(b"not-an-id"));
    }

    #[test]
    fn id_order_follows_timestamp_then_sequence() {
        assert!(StreamId::new(5, 1) < StreamId::new(6, 0));
        assert!(StreamId::new(5, 1) < StreamId::new(5, 2));
    }
}
