//! Operations on lists.

use std::time::Duration;

use crate::client::{Error, ErrorKind};
use crate::connector::Connector;
use crate::resp::Command;
use crate::serializer::{Deserializer, Serializer};
use crate::template::Template;

/// View over the list commands.
///
/// Obtained from [`Template::list_ops`](crate::Template::list_ops).
#[derive(Debug)]
pub struct ListOps<'a, KS, VS, C: Connector> {
    template: &'a Template<KS, VS, C>,
}

/// [`ListOps`](ListOps) narrowed to one fixed key.
#[derive(Debug)]
pub struct BoundListOps<'a, K: ?Sized, KS, VS, C: Connector> {
    ops: ListOps<'a, KS, VS, C>,
    key: &'a K,
}

/// End of a list, for [`lmove`](ListOps::lmove).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListSide {
    Left,
    Right,
}

impl ListSide {
    fn keyword(self) -> &'static str {
        match self {
            ListSide::Left => "LEFT",
            ListSide::Right => "RIGHT",
        }
    }
}

impl<'a, KS, VS, C: Connector> ListOps<'a, KS, VS, C> {
    pub(crate) fn new(template: &'a Template<KS, VS, C>) -> Self {
        ListOps { template }
    }

    /// <https://redis.io/commands/lpush>
    ///
    /// Returns the length of the list after the push.
    ///
    /// ```
    /// # helper::with_template(|template| async move {
    /// # let key = "doctest_list_lpush_1";
    /// # template.del(&[key]).await?;
    /// let ops = template.list_ops();
    /// let res = ops.lpush(key, &["world", "hello"]).await?;
    /// assert_eq!(2, res);
    /// let res: Vec<String> = ops.lrange(key, 0, -1).await?;
    /// assert_eq!(vec!["hello".to_owned(), "world".to_owned()], res);
    /// # Ok(())})?; Ok::<(), helper::BoxError>(())
    /// ```
    pub async fn lpush<K: ?Sized, V>(&self, key: &K, values: &[V]) -> Result<usize, Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V>,
    {
        self.push("LPUSH", key, values).await
    }

    /// <https://redis.io/commands/rpush>
    pub async fn rpush<K: ?Sized, V>(&self, key: &K, values: &[V]) -> Result<usize, Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V>,
    {
        self.push("RPUSH", key, values).await
    }

    /// <https://redis.io/commands/lpushx>
    ///
    /// Pushes only if the list already exists; returns its length, `0`
    /// otherwise.
    pub async fn lpushx<K: ?Sized, V>(&self, key: &K, values: &[V]) -> Result<usize, Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V>,
    {
        self.push("LPUSHX", key, values).await
    }

    /// <https://redis.io/commands/rpushx>
    pub async fn rpushx<K: ?Sized, V>(&self, key: &K, values: &[V]) -> Result<usize, Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V>,
    {
        self.push("RPUSHX", key, values).await
    }

    async fn push<K: ?Sized, V>(
        &self,
        name: &'static str,
        key: &K,
        values: &[V],
    ) -> Result<usize, Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V>,
    {
        if values.is_empty() {
            return Err(ErrorKind::InvalidArgument("push requires at least one value").into());
        }
        let mut cmd = Command::new(name);
        cmd.arg(self.template.raw_key(key)?);
        for value in values {
            cmd.arg(self.template.raw_value(value)?);
        }
        Ok(self.template.execute(&cmd).await?.into_integer()? as usize)
    }

    /// <https://redis.io/commands/lpop>
    pub async fn lpop<K: ?Sized, V>(&self, key: &K) -> Result<Option<V>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        self.pop_one("LPOP", key).await
    }

    /// <https://redis.io/commands/rpop>
    pub async fn rpop<K: ?Sized, V>(&self, key: &K) -> Result<Option<V>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        self.pop_one("RPOP", key).await
    }

    async fn pop_one<K: ?Sized, V>(&self, name: &'static str, key: &K) -> Result<Option<V>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        let mut cmd = Command::new(name);
        cmd.arg(self.template.raw_key(key)?);
        match self.template.execute(&cmd).await?.into_opt_blob()? {
            Some(raw) => Ok(Some(self.template.read_value(&raw)?)),
            None => Ok(None),
        }
    }

    /// <https://redis.io/commands/lpop> with a count.
    ///
    /// Returns an empty vector when the key does not exist.
    pub async fn lpop_count<K: ?Sized, V>(&self, key: &K, count: usize) -> Result<Vec<V>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        self.pop_many("LPOP", key, count).await
    }

    /// <https://redis.io/commands/rpop> with a count.
    pub async fn rpop_count<K: ?Sized, V>(&self, key: &K, count: usize) -> Result<Vec<V>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        self.pop_many("RPOP", key, count).await
    }

    async fn pop_many<K: ?Sized, V>(
        &self,
        name: &'static str,
        key: &K,
        count: usize,
    ) -> Result<Vec<V>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        let mut cmd = Command::new(name);
        cmd.arg(self.template.raw_key(key)?).arg_uint(count as u64);
        match self.template.execute(&cmd).await?.into_opt_array()? {
            Some(items) => self.template.read_values(items),
            None => Ok(vec![]),
        }
    }

    /// <https://redis.io/commands/blpop>
    ///
    /// Waits up to `timeout` for an element; `None` on timeout. A zero
    /// timeout waits forever and holds the pooled connection while doing so.
    pub async fn blpop<K: ?Sized, V>(&self, key: &K, timeout: Duration) -> Result<Option<V>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        self.blocking_pop("BLPOP", key, timeout).await
    }

    /// <https://redis.io/commands/brpop>
    pub async fn brpop<K: ?Sized, V>(&self, key: &K, timeout: Duration) -> Result<Option<V>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        self.blocking_pop("BRPOP", key, timeout).await
    }

    async fn blocking_pop<K: ?Sized, V>(
        &self,
        name: &'static str,
        key: &K,
        timeout: Duration,
    ) -> Result<Option<V>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        let mut cmd = Command::new(name);
        cmd.arg(self.template.raw_key(key)?)
            .arg_double(timeout.as_secs_f64());
        // reply is [key, value] since the command accepts multiple keys
        match self.template.execute(&cmd).await?.into_opt_array()? {
            Some(mut pair) => match pair.pop() {
                Some(value) => Ok(Some(self.template.read_value(&value.into_blob()?)?)),
                None => Ok(None),
            },
            None => Ok(None),
        }
    }

    /// <https://redis.io/commands/lrange>
    ///
    /// Both offsets are inclusive and may be negative to count from the end;
    /// `(0, -1)` is the whole list.
    pub async fn lrange<K: ?Sized, V>(
        &self,
        key: &K,
        start: isize,
        stop: isize,
    ) -> Result<Vec<V>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        let mut cmd = Command::new("LRANGE");
        cmd.arg(self.template.raw_key(key)?)
            .arg_int(start as i64)
            .arg_int(stop as i64);
        let items = self.template.execute(&cmd).await?.into_array()?;
        self.template.read_values(items)
    }

    /// <https://redis.io/commands/llen>
    pub async fn llen<K: ?Sized>(&self, key: &K) -> Result<usize, Error>
    where
        KS: Serializer<K>,
    {
        let mut cmd = Command::new("LLEN");
        cmd.arg(self.template.raw_key(key)?);
        Ok(self.template.execute(&cmd).await?.into_integer()? as usize)
    }

    /// <https://redis.io/commands/lindex>
    pub async fn lindex<K: ?Sized, V>(&self, key: &K, index: isize) -> Result<Option<V>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        let mut cmd = Command::new("LINDEX");
        cmd.arg(self.template.raw_key(key)?).arg_int(index as i64);
        match self.template.execute(&cmd).await?.into_opt_blob()? {
            Some(raw) => Ok(Some(self.template.read_value(&raw)?)),
            None => Ok(None),
        }
    }

    /// <https://redis.io/commands/lset>
    pub async fn lset<K: ?Sized, V: ?Sized>(
        &self,
        key: &K,
        index: isize,
        value: &V,
    ) -> Result<(), Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V>,
    {
        let mut cmd = Command::new("LSET");
        cmd.arg(self.template.raw_key(key)?)
            .arg_int(index as i64)
            .arg(self.template.raw_value(value)?);
        self.template.execute(&cmd).await?.into_ok().map_err(Into::into)
    }

    /// <https://redis.io/commands/ltrim>
    pub async fn ltrim<K: ?Sized>(&self, key: &K, start: isize, stop: isize) -> Result<(), Error>
    where
        KS: Serializer<K>,
    {
        let mut cmd = Command::new("LTRIM");
        cmd.arg(self.template.raw_key(key)?)
            .arg_int(start as i64)
            .arg_int(stop as i64);
        self.template.execute(&cmd).await?.into_ok().map_err(Into::into)
    }

    /// <https://redis.io/commands/lrem>
    ///
    /// Removes up to `count` occurrences of `value`; a negative `count`
    /// scans from the tail, zero removes them all. Returns how many were
    /// removed.
    pub async fn lrem<K: ?Sized, V: ?Sized>(
        &self,
        key: &K,
        count: isize,
        value: &V,
    ) -> Result<usize, Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V>,
    {
        let mut cmd = Command::new("LREM");
        cmd.arg(self.template.raw_key(key)?)
            .arg_int(count as i64)
            .arg(self.template.raw_value(value)?);
        Ok(self.template.execute(&cmd).await?.into_integer()? as usize)
    }

    /// <https://redis.io/commands/linsert> before the pivot.
    ///
    /// Returns the new length, `-1` when the pivot was not found, or `0`
    /// when the key does not exist.
    pub async fn linsert_before<K: ?Sized, P: ?Sized, V: ?Sized>(
        &self,
        key: &K,
        pivot: &P,
        value: &V,
    ) -> Result<i64, Error>
    where
        KS: Serializer<K>,
        VS: Serializer<P> + Serializer<V>,
    {
        self.insert("BEFORE", key, pivot, value).await
    }

    /// <https://redis.io/commands/linsert> after the pivot.
    pub async fn linsert_after<K: ?Sized, P: ?Sized, V: ?Sized>(
        &self,
        key: &K,
        pivot: &P,
        value: &V,
    ) -> Result<i64, Error>
    where
        KS: Serializer<K>,
        VS: Serializer<P> + Serializer<V>,
    {
        self.insert("AFTER", key, pivot, value).await
    }

    async fn insert<K: ?Sized, P: ?Sized, V: ?Sized>(
        &self,
        place: &'static str,
        key: &K,
        pivot: &P,
        value: &V,
    ) -> Result<i64, Error>
    where
        KS: Serializer<K>,
        VS: Serializer<P> + Serializer<V>,
    {
        let mut cmd = Command::new("LINSERT");
        cmd.arg(self.template.raw_key(key)?)
            .arg_static(place)
            .arg(self.template.raw_value(pivot)?)
            .arg(self.template.raw_value(value)?);
        self.template.execute(&cmd).await?.into_integer().map_err(Into::into)
    }

    /// <https://redis.io/commands/lmove>
    ///
    /// Atomically moves one element between two lists and returns it, or
    /// `None` when the source is empty.
    pub async fn lmove<K: ?Sized, N: ?Sized, V>(
        &self,
        source: &K,
        destination: &N,
        from: ListSide,
        to: ListSide,
    ) -> Result<Option<V>, Error>
    where
        KS: Serializer<K> + Serializer<N>,
        VS: Deserializer<V>,
    {
        let mut cmd = Command::new("LMOVE");
        cmd.arg(self.template.raw_key(source)?)
            .arg(self.template.raw_key(destination)?)
            .arg_static(from.keyword())
            .arg_static(to.keyword());
        match self.template.execute(&cmd).await?.into_opt_blob()? {
            Some(raw) => Ok(Some(self.template.read_value(&raw)?)),
            None => Ok(None),
        }
    }
}

impl<'a, K: ?Sized, KS, VS, C: Connector> BoundListOps<'a, K, KS, VS, C>
where
    KS: Serializer<K>,
{
    pub(crate) fn new(ops: ListOps<'a, KS, VS, C>, key: &'a K) -> Self {
        BoundListOps { ops, key }
    }

    /// The key every call operates on.
    pub fn key(&self) -> &K {
        self.key
    }

    /// Bound [`lpush`](ListOps::lpush).
    pub async fn lpush<V>(&self, values: &[V]) -> Result<usize, Error>
    where
        VS: Serializer<V>,
    {
        self.ops.lpush(self.key, values).await
    }

    /// Bound [`rpush`](ListOps::rpush).
    pub async fn rpush<V>(&self, values: &[V]) -> Result<usize, Error>
    where
        VS: Serializer<V>,
    {
        self.ops.rpush(self.key, values).await
    }

    /// Bound [`lpushx`](ListOps::lpushx).
    pub async fn lpushx<V>(&self, values: &[V]) -> Result<usize, Error>
    where
        VS: Serializer<V>,
    {
        self.ops.lpushx(self.key, values).await
    }

    /// Bound [`rpushx`](ListOps::rpushx).
    pub async fn rpushx<V>(&self, values: &[V]) -> Result<usize, Error>
    where
        VS: Serializer<V>,
    {
        self.ops.rpushx(self.key, values).await
    }

    /// Bound [`lpop`](ListOps::lpop).
    pub async fn lpop<V>(&self) -> Result<Option<V>, Error>
    where
        VS: Deserializer<V>,
    {
        self.ops.lpop(self.key).await
    }

    /// Bound [`rpop`](ListOps::rpop).
    pub async fn rpop<V>(&self) -> Result<Option<V>, Error>
    where
        VS: Deserializer<V>,
    {
        self.ops.rpop(self.key).await
    }

    /// Bound [`lpop_count`](ListOps::lpop_count).
    pub async fn lpop_count<V>(&self, count: usize) -> Result<Vec<V>, Error>
    where
        VS: Deserializer<V>,
    {
        self.ops.lpop_count(self.key, count).await
    }

    /// Bound [`rpop_count`](ListOps::rpop_count).
    pub async fn rpop_count<V>(&self, count: usize) -> Result<Vec<V>, Error>
    where
        VS: Deserializer<V>,
    {
        self.ops.rpop_count(self.key, count).await
    }

    /// Bound [`blpop`](ListOps::blpop).
    pub async fn blpop<V>(&self, timeout: Duration) -> Result<Option<V>, Error>
    where
        VS: Deserializer<V>,
    {
        self.ops.blpop(self.key, timeout).await
    }

    /// Bound [`brpop`](ListOps::brpop).
    pub async fn brpop<V>(&self, timeout: Duration) -> Result<Option<V>, Error>
    where
        VS: Deserializer<V>,
    {
        self.ops.brpop(self.key, timeout).await
    }

    /// Bound [`lrange`](ListOps::lrange).
    pub async fn lrange<V>(&self, start: isize, stop: isize) -> Result<Vec<V>, Error>
    where
        VS: Deserializer<V>,
    {
        self.ops.lrange(self.key, start, stop).await
    }

    /// Bound [`llen`](ListOps::llen).
    pub async fn llen(&self) -> Result<usize, Error> {
        self.ops.llen(self.key).await
    }

    /// Bound [`lindex`](ListOps::lindex).
    pub async fn lindex<V>(&self, index: isize) -> Result<Option<V>, Error>
    where
        VS: Deserializer<V>,
    {
        self.ops.lindex(self.key, index).await
    }

    /// Bound [`lset`](ListOps::lset).
    pub async fn lset<V: ?Sized>(&self, index: isize, value: &V) -> Result<(), Error>
    where
        VS: Serializer<V>,
    {
        self.ops.lset(self.key, index, value).await
    }

    /// Bound [`ltrim`](ListOps::ltrim).
    pub async fn ltrim(&self, start: isize, stop: isize) -> Result<(), Error> {
        self.ops.ltrim(self.key, start, stop).await
    }

    /// Bound [`lrem`](ListOps::lrem).
    pub async fn lrem<V: ?Sized>(&self, count: isize, value: &V) -> Result<usize, Error>
    where
        VS: Serializer<V>,
    {
        self.ops.lrem(self.key, count, value).await
    }

    /// Bound [`linsert_before`](ListOps::linsert_before).
    pub async fn linsert_before<P: ?Sized, V: ?Sized>(
        &self,
        pivot: &P,
        value: &V,
    ) -> Result<i64, Error>
    where
        VS: Serializer<P> + Serializer<V>,
    {
        self.ops.linsert_before(self.key, pivot, value).await
    }

    /// Bound [`linsert_after`](ListOps::linsert_after).
    pub async fn linsert_after<P: ?Sized, V: ?Sized>(
        &self,
        pivot: &P,
        value: &V,
    ) -> Result<i64, Error>
    where
        VS: Serializer<P> + Serializer<V>,
    {
        self.ops.linsert_after(self.key, pivot, value).await
    }
}
