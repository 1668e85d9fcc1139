//! The typed entry point of the crate.
//!
//! A [`Template`](self::Template) owns a pooled [`Client`](crate::Client)
//! together with one serializer for keys and one for values. Everything the
//! operation views do funnels through it: keys and values become bytes here,
//! one command is executed per call, and replies are decoded back.

use std::time::{Duration, SystemTime};

use bytes::Bytes;

use crate::client::{Client, Connection, Error};
use crate::connector::{Connector, TcpConnector};
use crate::expiry::{Expiration, TimeUnit};
use crate::ops::{
    BoundGeoOps, BoundHashOps, BoundHyperLogLogOps, BoundListOps, BoundSetOps, BoundStreamOps,
    BoundValueOps, BoundZSetOps, GeoOps, HashOps, HyperLogLogOps, ListOps, SetOps, StreamOps,
    ValueOps, ZSetOps,
};
use crate::resp::{Command, TypeError, Value};
use crate::serializer::{Deserializer, Serializer, StringSerializer};

#[cfg(test)]
mod tests;

/// Typed data access over one Redis server.
///
/// The default configuration stores keys and values as UTF-8 text. Any other
/// storage format is a matter of swapping serializers; see
/// [`with_serializers`](Self::with_serializers).
///
/// Key-level commands live directly on the template. Commands specific to a
/// data type live on the per-type views returned by
/// [`value_ops`](Self::value_ops), [`hash_ops`](Self::hash_ops) and friends,
/// and on the key-bound variants returned by
/// [`bound_value_ops`](Self::bound_value_ops) etc.
#[derive(Debug)]
pub struct Template<KS = StringSerializer, VS = StringSerializer, C: Connector = TcpConnector> {
    client: Client<C>,
    key_serializer: KS,
    value_serializer: VS,
}

/// The type of value stored at a key, as reported by `TYPE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyType {
    None,
    String,
    List,
    Set,
    ZSet,
    Hash,
    Stream,
    /// A type this crate has no dedicated view for, like a module type.
    Other(String),
}

/// A connection checked out for `WATCH`/`MULTI`/`EXEC` use.
///
/// Everything sent through a session stays on the same connection, which is
/// what the optimistic locking commands require. The connection returns to
/// the pool when the session is dropped.
#[derive(Debug)]
pub struct Session<'a, KS, VS, C: Connector> {
    template: &'a Template<KS, VS, C>,
    conn: Connection<C::Stream>,
}

impl Template {
    /// Connects with default configurations: UTF-8 keys and values over TCP.
    ///
    /// # Panic
    ///
    /// It panics if `connection_limit` is zero.
    pub async fn new(connection_limit: usize, addr: &str) -> Result<Self, Error> {
        Ok(Template::from_client(
            Client::new(connection_limit, addr).await?,
        ))
    }
}

impl<C: Connector> Template<StringSerializer, StringSerializer, C> {
    /// Wraps an existing client with the default serializers.
    pub fn from_client(client: Client<C>) -> Self {
        Template {
            client,
            key_serializer: StringSerializer,
            value_serializer: StringSerializer,
        }
    }
}

impl<KS, VS, C: Connector> Template<KS, VS, C> {
    /// Replaces both serializers, keeping the client.
    pub fn with_serializers<KS2, VS2>(self, keys: KS2, values: VS2) -> Template<KS2, VS2, C> {
        Template {
            client: self.client,
            key_serializer: keys,
            value_serializer: values,
        }
    }

    /// The underlying pooled client.
    pub fn client(&self) -> &Client<C> {
        &self.client
    }

    /// Sends a command that has no typed helper.
    ///
    /// Arguments must already be serialized; the reply comes back undecoded.
    pub async fn raw_command(&self, command: &Command) -> Result<Value, Error> {
        self.client.raw_command(command).await
    }

    /// Checks out a dedicated connection for transactional use.
    pub async fn session(&self) -> Result<Session<'_, KS, VS, C>, Error> {
        Ok(Session {
            template: self,
            conn: self.client.connection().await?,
        })
    }

    // per-type views

    pub fn value_ops(&self) -> ValueOps<'_, KS, VS, C> {
        ValueOps::new(self)
    }

    pub fn list_ops(&self) -> ListOps<'_, KS, VS, C> {
        ListOps::new(self)
    }

    pub fn set_ops(&self) -> SetOps<'_, KS, VS, C> {
        SetOps::new(self)
    }

    pub fn zset_ops(&self) -> ZSetOps<'_, KS, VS, C> {
        ZSetOps::new(self)
    }

    pub fn hash_ops(&self) -> HashOps<'_, KS, VS, C> {
        HashOps::new(self)
    }

    pub fn geo_ops(&self) -> GeoOps<'_, KS, VS, C> {
        GeoOps::new(self)
    }

    pub fn stream_ops(&self) -> StreamOps<'_, KS, VS, C> {
        StreamOps::new(self)
    }

    pub fn hyperloglog_ops(&self) -> HyperLogLogOps<'_, KS, VS, C> {
        HyperLogLogOps::new(self)
    }

    // key-bound views
    //
    // A bound view narrows its ops interface to one fixed key: every call
    // forwards to the unbound operation with the bound key supplied first.

    pub fn bound_value_ops<'a, K: ?Sized>(&'a self, key: &'a K) -> BoundValueOps<'a, K, KS, VS, C>
    where
        KS: Serializer<K>,
    {
        BoundValueOps::new(self.value_ops(), key)
    }

    pub fn bound_list_ops<'a, K: ?Sized>(&'a self, key: &'a K) -> BoundListOps<'a, K, KS, VS, C>
    where
        KS: Serializer<K>,
    {
        BoundListOps::new(self.list_ops(), key)
    }

    pub fn bound_set_ops<'a, K: ?Sized>(&'a self, key: &'a K) -> BoundSetOps<'a, K, KS, VS, C>
    where
        KS: Serializer<K>,
    {
        BoundSetOps::new(self.set_ops(), key)
    }

    pub fn bound_zset_ops<'a, K: ?Sized>(&'a self, key: &'a K) -> BoundZSetOps<'a, K, KS, VS, C>
    where
        KS: Serializer<K>,
    {
        BoundZSetOps::new(self.zset_ops(), key)
    }

    pub fn bound_hash_ops<'a, K: ?Sized>(&'a self, key: &'a K) -> BoundHashOps<'a, K, KS, VS, C>
    where
        KS: Serializer<K>,
    {
        BoundHashOps::new(self.hash_ops(), key)
    }

    pub fn bound_geo_ops<'a, K: ?Sized>(&'a self, key: &'a K) -> BoundGeoOps<'a, K, KS, VS, C>
    where
        KS: Serializer<K>,
    {
        BoundGeoOps::new(self.geo_ops(), key)
    }

    pub fn bound_stream_ops<'a, K: ?Sized>(
        &'a self,
        key: &'a K,
    ) -> BoundStreamOps<'a, K, KS, VS, C>
    where
        KS: Serializer<K>,
    {
        BoundStreamOps::new(self.stream_ops(), key)
    }

    pub fn bound_hyperloglog_ops<'a, K: ?Sized>(
        &'a self,
        key: &'a K,
    ) -> BoundHyperLogLogOps<'a, K, KS, VS, C>
    where
        KS: Serializer<K>,
    {
        BoundHyperLogLogOps::new(self.hyperloglog_ops(), key)
    }

    // key-level commands

    /// <https://redis.io/commands/del>
    ///
    /// Returns the number of keys that were removed. An empty `keys` slice
    /// is a no-op.
    pub async fn del<K>(&self, keys: &[K]) -> Result<usize, Error>
    where
        KS: Serializer<K>,
    {
        self.drop_keys("DEL", keys).await
    }

    /// <https://redis.io/commands/unlink>
    ///
    /// Like [`del`](Self::del), but the server reclaims memory lazily.
    pub async fn unlink<K>(&self, keys: &[K]) -> Result<usize, Error>
    where
        KS: Serializer<K>,
    {
        self.drop_keys("UNLINK", keys).await
    }

    async fn drop_keys<K>(&self, name: &'static str, keys: &[K]) -> Result<usize, Error>
    where
        KS: Serializer<K>,
    {
        if keys.is_empty() {
            return Ok(0);
        }
        let mut cmd = Command::new(name);
        for key in keys {
            cmd.arg(self.raw_key(key)?);
        }
        Ok(self.execute(&cmd).await?.into_integer()? as usize)
    }

    /// <https://redis.io/commands/exists>
    ///
    /// Counts how many of the given keys exist; a key repeated in `keys` is
    /// counted every time.
    pub async fn exists<K>(&self, keys: &[K]) -> Result<usize, Error>
    where
        KS: Serializer<K>,
    {
        if keys.is_empty() {
            return Ok(0);
        }
        let mut cmd = Command::new("EXISTS");
        for key in keys {
            cmd.arg(self.raw_key(key)?);
        }
        Ok(self.execute(&cmd).await?.into_integer()? as usize)
    }

    /// Same as [`exists`](Self::exists), but takes a single key and returns
    /// `bool`.
    pub async fn exists_one<K: ?Sized>(&self, key: &K) -> Result<bool, Error>
    where
        KS: Serializer<K>,
    {
        let mut cmd = Command::new("EXISTS");
        cmd.arg(self.raw_key(key)?);
        self.execute(&cmd).await?.into_bool().map_err(Into::into)
    }

    /// <https://redis.io/commands/pexpire>
    ///
    /// Despite the name, this method uses `PEXPIRE`, not `EXPIRE`, for
    /// millisecond-level accuracy. Returns whether a timeout was set.
    pub async fn expire<K: ?Sized>(&self, key: &K, timeout: Duration) -> Result<bool, Error>
    where
        KS: Serializer<K>,
    {
        let mut cmd = Command::new("PEXPIRE");
        cmd.arg(self.raw_key(key)?)
            .arg_uint(timeout.as_millis() as u64);
        self.execute(&cmd).await?.into_bool().map_err(Into::into)
    }

    /// <https://redis.io/commands/pexpireat>
    ///
    /// Despite the name, this method uses `PEXPIREAT`, not `EXPIREAT`, for
    /// millisecond-level accuracy.
    pub async fn expire_at<K: ?Sized>(&self, key: &K, deadline: SystemTime) -> Result<bool, Error>
    where
        KS: Serializer<K>,
    {
        let unix = deadline
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or(Duration::ZERO);
        let mut cmd = Command::new("PEXPIREAT");
        cmd.arg(self.raw_key(key)?).arg_uint(unix.as_millis() as u64);
        self.execute(&cmd).await?.into_bool().map_err(Into::into)
    }

    /// <https://redis.io/commands/persist>
    ///
    /// Returns whether an expiry existed and was removed.
    pub async fn persist<K: ?Sized>(&self, key: &K) -> Result<bool, Error>
    where
        KS: Serializer<K>,
    {
        let mut cmd = Command::new("PERSIST");
        cmd.arg(self.raw_key(key)?);
        self.execute(&cmd).await?.into_bool().map_err(Into::into)
    }

    /// <https://redis.io/commands/pttl>
    ///
    /// The raw sentinel codes are folded into [`Expiration`](Expiration);
    /// this method never returns a negative duration.
    pub async fn ttl<K: ?Sized>(&self, key: &K) -> Result<Expiration, Error>
    where
        KS: Serializer<K>,
    {
        let mut cmd = Command::new("PTTL");
        cmd.arg(self.raw_key(key)?);
        let code = self.execute(&cmd).await?.into_integer()?;
        Ok(Expiration::from_code(code, TimeUnit::Milliseconds))
    }

    /// <https://redis.io/commands/type>
    pub async fn key_type<K: ?Sized>(&self, key: &K) -> Result<KeyType, Error>
    where
        KS: Serializer<K>,
    {
        let mut cmd = Command::new("TYPE");
        cmd.arg(self.raw_key(key)?);
        let name = self.execute(&cmd).await?.into_simple()?;
        let name: &[u8] = name.as_ref();
        Ok(match name {
            b"none" => KeyType::None,
            b"string" => KeyType::String,
            b"list" => KeyType::List,
            b"set" => KeyType::Set,
            b"zset" => KeyType::ZSet,
            b"hash" => KeyType::Hash,
            b"stream" => KeyType::Stream,
            _ => KeyType::Other(String::from_utf8_lossy(name).into_owned()),
        })
    }

    /// <https://redis.io/commands/rename>
    pub async fn rename<K: ?Sized, N: ?Sized>(&self, key: &K, new_key: &N) -> Result<(), Error>
    where
        KS: Serializer<K> + Serializer<N>,
    {
        let mut cmd = Command::new("RENAME");
        cmd.arg(self.raw_key(key)?).arg(self.raw_key(new_key)?);
        self.execute(&cmd).await?.into_ok().map_err(Into::into)
    }

    /// <https://redis.io/commands/renamenx>
    ///
    /// Returns whether the rename happened, i.e. `new_key` did not exist.
    pub async fn rename_nx<K: ?Sized, N: ?Sized>(&self, key: &K, new_key: &N) -> Result<bool, Error>
    where
        KS: Serializer<K> + Serializer<N>,
    {
        let mut cmd = Command::new("RENAMENX");
        cmd.arg(self.raw_key(key)?).arg(self.raw_key(new_key)?);
        self.execute(&cmd).await?.into_bool().map_err(Into::into)
    }

    /// <https://redis.io/commands/copy>
    pub async fn copy<K: ?Sized, N: ?Sized>(
        &self,
        source: &K,
        destination: &N,
        db: Option<u32>,
        replace: bool,
    ) -> Result<bool, Error>
    where
        KS: Serializer<K> + Serializer<N>,
    {
        let mut cmd = Command::new("COPY");
        cmd.arg(self.raw_key(source)?).arg(self.raw_key(destination)?);
        if let Some(db) = db {
            cmd.arg_static("DB").arg_uint(db.into());
        }
        if replace {
            cmd.arg_static("REPLACE");
        }
        self.execute(&cmd).await?.into_bool().map_err(Into::into)
    }

    /// <https://redis.io/commands/touch>
    pub async fn touch<K>(&self, keys: &[K]) -> Result<usize, Error>
    where
        KS: Serializer<K>,
    {
        if keys.is_empty() {
            return Ok(0);
        }
        let mut cmd = Command::new("TOUCH");
        for key in keys {
            cmd.arg(self.raw_key(key)?);
        }
        Ok(self.execute(&cmd).await?.into_integer()? as usize)
    }

    /// <https://redis.io/commands/scan>
    ///
    /// One page of the keyspace cursor. Start with cursor `0`; the returned
    /// cursor is `0` again once the iteration is complete.
    pub async fn scan<K>(
        &self,
        cursor: u64,
        match_pattern: Option<&str>,
        count: Option<usize>,
    ) -> Result<(u64, Vec<K>), Error>
    where
        KS: Deserializer<K>,
    {
        let mut cmd = Command::new("SCAN");
        cmd.arg_uint(cursor);
        if let Some(pattern) = match_pattern {
            cmd.arg_static("MATCH").arg_str(pattern);
        }
        if let Some(count) = count {
            cmd.arg_static("COUNT").arg_uint(count as u64);
        }
        let (cursor, items) = crate::ops::scan_reply(self.execute(&cmd).await?)?;
        let mut keys = Vec::with_capacity(items.len());
        for item in items {
            keys.push(self.read_key(&item.into_blob()?)?);
        }
        Ok((cursor, keys))
    }

    // plumbing shared with the ops views

    pub(crate) async fn execute(&self, command: &Command) -> Result<Value, Error> {
        self.client.raw_command(command).await
    }

    pub(crate) fn raw_key<K: ?Sized>(&self, key: &K) -> Result<Bytes, Error>
    where
        KS: Serializer<K>,
    {
        Ok(self.key_serializer.serialize(key)?)
    }

    pub(crate) fn raw_value<V: ?Sized>(&self, value: &V) -> Result<Bytes, Error>
    where
        VS: Serializer<V>,
    {
        Ok(self.value_serializer.serialize(value)?)
    }

    pub(crate) fn read_key<K>(&self, raw: &[u8]) -> Result<K, Error>
    where
        KS: Deserializer<K>,
    {
        Ok(self.key_serializer.deserialize(raw)?)
    }

    pub(crate) fn read_value<V>(&self, raw: &[u8]) -> Result<V, Error>
    where
        VS: Deserializer<V>,
    {
        Ok(self.value_serializer.deserialize(raw)?)
    }

    /// Decodes a sequence of blob values.
    pub(crate) fn read_values<V>(&self, items: Vec<Value>) -> Result<Vec<V>, Error>
    where
        VS: Deserializer<V>,
    {
        items
            .into_iter()
            .map(|item| self.read_value(&item.into_blob()?))
            .collect()
    }

    /// Decodes a sequence of nullable blob values, as `MGET` returns.
    pub(crate) fn read_opt_values<V>(&self, items: Vec<Value>) -> Result<Vec<Option<V>>, Error>
    where
        VS: Deserializer<V>,
    {
        items
            .into_iter()
            .map(|item| match item.into_opt_blob()? {
                Some(raw) => Ok(Some(self.read_value(&raw)?)),
                None => Ok(None),
            })
            .collect()
    }
}

impl<'a, KS, VS, C: Connector> Session<'a, KS, VS, C> {
    /// <https://redis.io/commands/watch>
    ///
    /// Marks keys so a later [`exec`](Self::exec) aborts if any of them
    /// changed in the meantime. An empty `keys` slice is a no-op.
    pub async fn watch<K>(&mut self, keys: &[K]) -> Result<(), Error>
    where
        KS: Serializer<K>,
    {
        if keys.is_empty() {
            return Ok(());
        }
        let mut cmd = Command::new("WATCH");
        for key in keys {
            cmd.arg(self.template.raw_key(key)?);
        }
        self.conn.raw_command(&cmd).await?.into_ok().map_err(Into::into)
    }

    /// <https://redis.io/commands/unwatch>
    pub async fn unwatch(&mut self) -> Result<(), Error> {
        let cmd = Command::new("UNWATCH");
        self.conn.raw_command(&cmd).await?.into_ok().map_err(Into::into)
    }

    /// <https://redis.io/commands/multi>
    pub async fn multi(&mut self) -> Result<(), Error> {
        let cmd = Command::new("MULTI");
        self.conn.raw_command(&cmd).await?.into_ok().map_err(Into::into)
    }

    /// Queues one command inside an open `MULTI` block.
    pub async fn queue(&mut self, command: &Command) -> Result<(), Error> {
        let reply = self.conn.raw_command(command).await?;
        let msg = reply.into_simple()?;
        if msg == "QUEUED" {
            Ok(())
        } else {
            Err(TypeError::other("QUEUED", msg).into())
        }
    }

    /// <https://redis.io/commands/exec>
    ///
    /// Returns the queued replies, or `None` if a watched key changed and
    /// the transaction was aborted.
    pub async fn exec(&mut self) -> Result<Option<Vec<Value>>, Error> {
        let cmd = Command::new("EXEC");
        self.conn
            .raw_command(&cmd)
            .await?
            .into_opt_array()
            .map_err(Into::into)
    }

    /// <https://redis.io/commands/discard>
    pub async fn discard(&mut self) -> Result<(), Error> {
        let cmd = Command::new("DISCARD");
        self.conn.raw_command(&cmd).await?.into_ok().map_err(Into::into)
    }

    /// Sends any command on this session's connection.
    pub async fn raw_command(&mut self, command: &Command) -> Result<Value, Error> {
        self.conn.raw_command(command).await
    }
}
