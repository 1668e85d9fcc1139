//! Operations on sets.

use crate::client::{Error, ErrorKind};
use crate::connector::Connector;
use crate::resp::Command;
use crate::serializer::{Deserializer, Serializer};
use crate::template::Template;

/// View over the set commands.
///
/// Obtained from [`Template::set_ops`](crate::Template::set_ops).
#[derive(Debug)]
pub struct SetOps<'a, KS, VS, C: Connector> {
    template: &'a Template<KS, VS, C>,
}

/// [`SetOps`](SetOps) narrowed to one fixed key.
#[derive(Debug)]
pub struct BoundSetOps<'a, K: ?Sized, KS, VS, C: Connector> {
    ops: SetOps<'a, KS, VS, C>,
    key: &'a K,
}

impl<'a, KS, VS, C: Connector> SetOps<'a, KS, VS, C> {
    pub(crate) fn new(template: &'a Template<KS, VS, C>) -> Self {
        SetOps { template }
    }

    /// <https://redis.io/commands/sadd>
    ///
    /// Returns the number of members that were not already present.
    ///
    /// ```
    /// # helper::with_template(|template| async move {
    /// # let key = "doctest_set_sadd_1";
    /// # template.del(&[key]).await?;
    /// let ops = template.set_ops();
    /// let res = ops.sadd(key, &["a", "b", "a"]).await?;
    /// assert_eq!(2, res);
    /// let res = ops.sismember(key, "b").await?;
    /// assert!(res);
    /// # Ok(())})?; Ok::<(), helper::BoxError>(())
    /// ```
    pub async fn sadd<K: ?Sized, V>(&self, key: &K, members: &[V]) -> Result<usize, Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V>,
    {
        if members.is_empty() {
            return Err(ErrorKind::InvalidArgument("sadd requires at least one member").into());
        }
        let mut cmd = Command::new("SADD");
        cmd.arg(self.template.raw_key(key)?);
        for member in members {
            cmd.arg(self.template.raw_value(member)?);
        }
        Ok(self.template.execute(&cmd).await?.into_integer()? as usize)
    }

    /// <https://redis.io/commands/srem>
    pub async fn srem<K: ?Sized, V>(&self, key: &K, members: &[V]) -> Result<usize, Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V>,
    {
        if members.is_empty() {
            return Ok(0);
        }
        let mut cmd = Command::new("SREM");
        cmd.arg(self.template.raw_key(key)?);
        for member in members {
            cmd.arg(self.template.raw_value(member)?);
        }
        Ok(self.template.execute(&cmd).await?.into_integer()? as usize)
    }

    /// <https://redis.io/commands/spop>
    pub async fn spop<K: ?Sized, V>(&self, key: &K) -> Result<Option<V>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        let mut cmd = Command::new("SPOP");
        cmd.arg(self.template.raw_key(key)?);
        match self.template.execute(&cmd).await?.into_opt_blob()? {
            Some(raw) => Ok(Some(self.template.read_value(&raw)?)),
            None => Ok(None),
        }
    }

    /// <https://redis.io/commands/spop> with a count.
    pub async fn spop_count<K: ?Sized, V>(&self, key: &K, count: usize) -> Result<Vec<V>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        let mut cmd = Command::new("SPOP");
        cmd.arg(self.template.raw_key(key)?).arg_uint(count as u64);
        let items = self.template.execute(&cmd).await?.into_array()?;
        self.template.read_values(items)
    }

    /// <https://redis.io/commands/smembers>
    pub async fn smembers<K: ?Sized, V>(&self, key: &K) -> Result<Vec<V>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        let mut cmd = Command::new("SMEMBERS");
        cmd.arg(self.template.raw_key(key)?);
        let items = self.template.execute(&cmd).await?.into_array()?;
        self.template.read_values(items)
    }

    /// <https://redis.io/commands/sismember>
    pub async fn sismember<K: ?Sized, V: ?Sized>(&self, key: &K, member: &V) -> Result<bool, Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V>,
    {
        let mut cmd = Command::new("SISMEMBER");
        cmd.arg(self.template.raw_key(key)?)
            .arg(self.template.raw_value(member)?);
        self.template.execute(&cmd).await?.into_bool().map_err(Into::into)
    }

    /// <https://redis.io/commands/smismember>
    ///
    /// One flag per queried member, in order.
    pub async fn smismember<K: ?Sized, V>(&self, key: &K, members: &[V]) -> Result<Vec<bool>, Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V>,
    {
        if members.is_empty() {
            return Ok(vec![]);
        }
        let mut cmd = Command::new("SMISMEMBER");
        cmd.arg(self.template.raw_key(key)?);
        for member in members {
            cmd.arg(self.template.raw_value(member)?);
        }
        self.template
            .execute(&cmd)
            .await?
            .into_array()?
            .into_iter()
            .map(|item| item.into_bool().map_err(Into::into))
            .collect()
    }

    /// <https://redis.io/commands/scard>
    pub async fn scard<K: ?Sized>(&self, key: &K) -> Result<usize, Error>
    where
        KS: Serializer<K>,
    {
        let mut cmd = Command::new("SCARD");
        cmd.arg(self.template.raw_key(key)?);
        Ok(self.template.execute(&cmd).await?.into_integer()? as usize)
    }

    /// <https://redis.io/commands/srandmember>
    pub async fn srandmember<K: ?Sized, V>(&self, key: &K) -> Result<Option<V>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        let mut cmd = Command::new("SRANDMEMBER");
        cmd.arg(self.template.raw_key(key)?);
        match self.template.execute(&cmd).await?.into_opt_blob()? {
            Some(raw) => Ok(Some(self.template.read_value(&raw)?)),
            None => Ok(None),
        }
    }

    /// <https://redis.io/commands/srandmember> with a count.
    ///
    /// A negative count may repeat members.
    pub async fn srandmember_count<K: ?Sized, V>(
        &self,
        key: &K,
        count: isize,
    ) -> Result<Vec<V>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        let mut cmd = Command::new("SRANDMEMBER");
        cmd.arg(self.template.raw_key(key)?).arg_int(count as i64);
        let items = self.template.execute(&cmd).await?.into_array()?;
        self.template.read_values(items)
    }

    /// <https://redis.io/commands/smove>
    ///
    /// Returns whether the member existed in the source set.
    pub async fn smove<K: ?Sized, N: ?Sized, V: ?Sized>(
        &self,
        source: &K,
        destination: &N,
        member: &V,
    ) -> Result<bool, Error>
    where
        KS: Serializer<K> + Serializer<N>,
        VS: Serializer<V>,
    {
        let mut cmd = Command::new("SMOVE");
        cmd.arg(self.template.raw_key(source)?)
            .arg(self.template.raw_key(destination)?)
            .arg(self.template.raw_value(member)?);
        self.template.execute(&cmd).await?.into_bool().map_err(Into::into)
    }

    /// <https://redis.io/commands/sinter>
    pub async fn sinter<K, V>(&self, keys: &[K]) -> Result<Vec<V>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        self.combine("SINTER", keys).await
    }

    /// <https://redis.io/commands/sunion>
    pub async fn sunion<K, V>(&self, keys: &[K]) -> Result<Vec<V>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        self.combine("SUNION", keys).await
    }

    /// <https://redis.io/commands/sdiff>
    ///
    /// Members of the first set that appear in none of the others.
    pub async fn sdiff<K, V>(&self, keys: &[K]) -> Result<Vec<V>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        self.combine("SDIFF", keys).await
    }

    async fn combine<K, V>(&self, name: &'static str, keys: &[K]) -> Result<Vec<V>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        if keys.is_empty() {
            return Err(ErrorKind::InvalidArgument("set algebra requires at least one key").into());
        }
        let mut cmd = Command::new(name);
        for key in keys {
            cmd.arg(self.template.raw_key(key)?);
        }
        let items = self.template.execute(&cmd).await?.into_array()?;
        self.template.read_values(items)
    }

    /// <https://redis.io/commands/sinterstore>
    ///
    /// Returns the size of the stored result.
    pub async fn sinterstore<N: ?Sized, K>(
        &self,
        destination: &N,
        keys: &[K],
    ) -> Result<usize, Error>
    where
        KS: Serializer<N> + Serializer<K>,
    {
        self.combine_store("SINTERSTORE", destination, keys).await
    }

    /// <https://redis.io/commands/sunionstore>
    pub async fn sunionstore<N: ?Sized, K>(
        &self,
        destination: &N,
        keys: &[K],
    ) -> Result<usize, Error>
    where
        KS: Serializer<N> + Serializer<K>,
    {
        self.combine_store("SUNIONSTORE", destination, keys).await
    }

    /// <https://redis.io/commands/sdiffstore>
    pub async fn sdiffstore<N: ?Sized, K>(
        &self,
        destination: &N,
        keys: &[K],
    ) -> Result<usize, Error>
    where
        KS: Serializer<N> + Serializer<K>,
    {
        self.combine_store("SDIFFSTORE", destination, keys).await
    }

    async fn combine_store<N: ?Sized, K>(
        &self,
        name: &'static str,
        destination: &N,
        keys: &[K],
    ) -> Result<usize, Error>
    where
        KS: Serializer<N> + Serializer<K>,
    {
        if keys.is_empty() {
            return Err(ErrorKind::InvalidArgument("set algebra requires at least one key").into());
        }
        let mut cmd = Command::new(name);
        cmd.arg(self.template.raw_key(destination)?);
        for key in keys {
            cmd.arg(self.template.raw_key(key)?);
        }
        Ok(self.template.execute(&cmd).await?.into_integer()? as usize)
    }

    /// <https://redis.io/commands/sscan>
    pub async fn sscan<K: ?Sized, V>(
        &self,
        key: &K,
        cursor: u64,
        match_pattern: Option<&str>,
        count: Option<usize>,
    ) -> Result<(u64, Vec<V>), Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        let mut cmd = Command::new("SSCAN");
        cmd.arg(self.template.raw_key(key)?).arg_uint(cursor);
        if let Some(pattern) = match_pattern {
            cmd.arg_static("MATCH").arg_str(pattern);
        }
        if let Some(count) = count {
            cmd.arg_static("COUNT").arg_uint(count as u64);
        }
        let (cursor, items) = super::scan_reply(self.template.execute(&cmd).await?)?;
        Ok((cursor, self.template.read_values(items)?))
    }
}

impl<'a, K: ?Sized, KS, VS, C: Connector> BoundSetOps<'a, K, KS, VS, C>
where
    KS: Serializer<K>,
{
    pub(crate) fn new(ops: SetOps<'a, KS, VS, C>, key: &'a K) -> Self {
        BoundSetOps { ops, key }
    }

    /// The key every call operates on.
    pub fn key(&self) -> &K {
        self.key
    }

    /// Bound [`sadd`](SetOps::sadd).
    pub async fn sadd<V>(&self, members: &[V]) -> Result<usize, Error>
    where
        VS: Serializer<V>,
    {
        self.ops.sadd(self.key, members).await
    }

    /// Bound [`srem`](SetOps::srem).
    pub async fn srem<V>(&self, members: &[V]) -> Result<usize, Error>
    where
        VS: Serializer<V>,
    {
        self.ops.srem(self.key, members).await
    }

    /// Bound [`spop`](SetOps::spop).
    pub async fn spop<V>(&self) -> Result<Option<V>, Error>
    where
        VS: Deserializer<V>,
    {
        self.ops.spop(self.key).await
    }

    /// Bound [`spop_count`](SetOps::spop_count).
    pub async fn spop_count<V>(&self, count: usize) -> Result<Vec<V>, Error>
    where
        VS: Deserializer<V>,
    {
        self.ops.spop_count(self.key, count).await
    }

    /// Bound [`smembers`](SetOps::smembers).
    pub async fn smembers<V>(&self) -> Result<Vec<V>, Error>
    where
        VS: Deserializer<V>,
    {
        self.ops.smembers(self.key).await
    }

    /// Bound [`sismember`](SetOps::sismember).
    pub async fn sismember<V: ?Sized>(&self, member: &V) -> Result<bool, Error>
    where
        VS: Serializer<V>,
    {
        self.ops.sismember(self.key, member).await
    }

    /// Bound [`smismember`](SetOps::smismember).
    pub async fn smismember<V>(&self, members: &[V]) -> Result<Vec<bool>, Error>
    where
        VS: Serializer<V>,
    {
        self.ops.smismember(self.key, members).await
    }

    /// Bound [`scard`](SetOps::scard).
    pub async fn scard(&self) -> Result<usize, Error> {
        self.ops.scard(self.key).await
    }

    /// Bound [`srandmember`](SetOps::srandmember).
    pub async fn srandmember<V>(&self) -> Result<Option<V>, Error>
    where
        VS: Deserializer<V>,
    {
        self.ops.srandmember(self.key).await
    }

    /// Bound [`srandmember_count`](SetOps::srandmember_count).
    pub async fn srandmember_count<V>(&self, count: isize) -> Result<Vec<V>, Error>
    where
        VS: Deserializer<V>,
    {
        self.ops.srandmember_count(self.key, count).await
    }

    /// Bound [`sscan`](SetOps::sscan).
    pub async fn sscan<V>(
        &self,
        cursor: u64,
        match_pattern: Option<&str>,
        count: Option<usize>,
    ) -> Result<(u64, Vec<V>), Error>
    where
        VS: Deserializer<V>,
    {
        self.ops.sscan(self.key, cursor, match_pattern, count).await
    }
}
