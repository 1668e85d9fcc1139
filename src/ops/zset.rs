//! Operations on sorted sets.

use crate::client::{Error, ErrorKind};
use crate::connector::Connector;
use crate::resp::{Command, TypeError, Value};
use crate::serializer::{Deserializer, Serializer};
use crate::template::Template;

/// View over the sorted set commands.
///
/// Obtained from [`Template::zset_ops`](crate::Template::zset_ops). Scores
/// are always `f64`; members go through the value serializer.
#[derive(Debug)]
pub struct ZSetOps<'a, KS, VS, C: Connector> {
    template: &'a Template<KS, VS, C>,
}

/// [`ZSetOps`](ZSetOps) narrowed to one fixed key.
#[derive(Debug)]
pub struct BoundZSetOps<'a, K: ?Sized, KS, VS, C: Connector> {
    ops: ZSetOps<'a, KS, VS, C>,
    key: &'a K,
}

impl<'a, KS, VS, C: Connector> ZSetOps<'a, KS, VS, C> {
    pub(crate) fn new(template: &'a Template<KS, VS, C>) -> Self {
        ZSetOps { template }
    }

    /// <https://redis.io/commands/zadd>
    ///
    /// Returns whether the member was newly added (as opposed to rescored).
    ///
    /// ```
    /// # helper::with_template(|template| async move {
    /// # let key = "doctest_zset_zadd_1";
    /// # template.del(&[key]).await?;
    /// let ops = template.zset_ops();
    /// let res = ops.zadd(key, 1.0, "one").await?;
    /// assert!(res);
    /// let res = ops.zadd(key, 1.5, "one").await?;
    /// assert!(!res);
    /// let res = ops.zscore(key, "one").await?;
    /// assert_eq!(Some(1.5), res);
    /// # Ok(())})?; Ok::<(), helper::BoxError>(())
    /// ```
    pub async fn zadd<K: ?Sized, V: ?Sized>(
        &self,
        key: &K,
        score: f64,
        member: &V,
    ) -> Result<bool, Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V>,
    {
        let mut cmd = Command::new("ZADD");
        cmd.arg(self.template.raw_key(key)?)
            .arg_double(score)
            .arg(self.template.raw_value(member)?);
        self.template.execute(&cmd).await?.into_bool().map_err(Into::into)
    }

    /// <https://redis.io/commands/zadd> with several members.
    ///
    /// Returns how many were newly added.
    pub async fn zadd_multi<K: ?Sized, V>(
        &self,
        key: &K,
        entries: &[(V, f64)],
    ) -> Result<usize, Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V>,
    {
        if entries.is_empty() {
            return Ok(0);
        }
        let mut cmd = Command::new("ZADD");
        cmd.arg(self.template.raw_key(key)?);
        for (member, score) in entries {
            cmd.arg_double(*score).arg(self.template.raw_value(member)?);
        }
        Ok(self.template.execute(&cmd).await?.into_integer()? as usize)
    }

    /// <https://redis.io/commands/zincrby>
    ///
    /// Returns the new score.
    pub async fn zincrby<K: ?Sized, V: ?Sized>(
        &self,
        key: &K,
        delta: f64,
        member: &V,
    ) -> Result<f64, Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V>,
    {
        let mut cmd = Command::new("ZINCRBY");
        cmd.arg(self.template.raw_key(key)?)
            .arg_double(delta)
            .arg(self.template.raw_value(member)?);
        self.template.execute(&cmd).await?.into_double().map_err(Into::into)
    }

    /// <https://redis.io/commands/zrem>
    pub async fn zrem<K: ?Sized, V>(&self, key: &K, members: &[V]) -> Result<usize, Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V>,
    {
        if members.is_empty() {
            return Ok(0);
        }
        let mut cmd = Command::new("ZREM");
        cmd.arg(self.template.raw_key(key)?);
        for member in members {
            cmd.arg(self.template.raw_value(member)?);
        }
        Ok(self.template.execute(&cmd).await?.into_integer()? as usize)
    }

    /// <https://redis.io/commands/zscore>
    pub async fn zscore<K: ?Sized, V: ?Sized>(&self, key: &K, member: &V) -> Result<Option<f64>, Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V>,
    {
        let mut cmd = Command::new("ZSCORE");
        cmd.arg(self.template.raw_key(key)?)
            .arg(self.template.raw_value(member)?);
        self.template
            .execute(&cmd)
            .await?
            .into_opt_double()
            .map_err(Into::into)
    }

    /// <https://redis.io/commands/zmscore>
    ///
    /// One optional score per queried member, in order.
    pub async fn zmscore<K: ?Sized, V>(
        &self,
        key: &K,
        members: &[V],
    ) -> Result<Vec<Option<f64>>, Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V>,
    {
        if members.is_empty() {
            return Ok(vec![]);
        }
        let mut cmd = Command::new("ZMSCORE");
        cmd.arg(self.template.raw_key(key)?);
        for member in members {
            cmd.arg(self.template.raw_value(member)?);
        }
        self.template
            .execute(&cmd)
            .await?
            .into_array()?
            .into_iter()
            .map(|item| item.into_opt_double().map_err(Into::into))
            .collect()
    }

    /// <https://redis.io/commands/zrank>
    ///
    /// Position in ascending score order, starting at zero.
    pub async fn zrank<K: ?Sized, V: ?Sized>(&self, key: &K, member: &V) -> Result<Option<u64>, Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V>,
    {
        self.rank("ZRANK", key, member).await
    }

    /// <https://redis.io/commands/zrevrank>
    pub async fn zrevrank<K: ?Sized, V: ?Sized>(
        &self,
        key: &K,
        member: &V,
    ) -> Result<Option<u64>, Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V>,
    {
        self.rank("ZREVRANK", key, member).await
    }

    async fn rank<K: ?Sized, V: ?Sized>(
        &self,
        name: &'static str,
        key: &K,
        member: &V,
    ) -> Result<Option<u64>, Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V>,
    {
        let mut cmd = Command::new(name);
        cmd.arg(self.template.raw_key(key)?)
            .arg(self.template.raw_value(member)?);
        match self.template.execute(&cmd).await? {
            Value::Null => Ok(None),
            reply => Ok(Some(reply.into_integer()? as u64)),
        }
    }

    /// <https://redis.io/commands/zcard>
    pub async fn zcard<K: ?Sized>(&self, key: &K) -> Result<usize, Error>
    where
        KS: Serializer<K>,
    {
        let mut cmd = Command::new("ZCARD");
        cmd.arg(self.template.raw_key(key)?);
        Ok(self.template.execute(&cmd).await?.into_integer()? as usize)
    }

    /// <https://redis.io/commands/zcount>
    ///
    /// Counts members with `min <= score <= max`. Infinities are allowed as
    /// open bounds.
    pub async fn zcount<K: ?Sized>(&self, key: &K, min: f64, max: f64) -> Result<usize, Error>
    where
        KS: Serializer<K>,
    {
        let mut cmd = Command::new("ZCOUNT");
        cmd.arg(self.template.raw_key(key)?)
            .arg_double(min)
            .arg_double(max);
        Ok(self.template.execute(&cmd).await?.into_integer()? as usize)
    }

    /// <https://redis.io/commands/zrange>
    ///
    /// Rank-based range; both offsets are inclusive and may be negative.
    pub async fn zrange<K: ?Sized, V>(
        &self,
        key: &K,
        start: isize,
        stop: isize,
    ) -> Result<Vec<V>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        self.range("ZRANGE", key, start, stop).await
    }

    /// <https://redis.io/commands/zrevrange>
    pub async fn zrevrange<K: ?Sized, V>(
        &self,
        key: &K,
        start: isize,
        stop: isize,
    ) -> Result<Vec<V>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        self.range("ZREVRANGE", key, start, stop).await
    }

    async fn range<K: ?Sized, V>(
        &self,
        name: &'static str,
        key: &K,
        start: isize,
        stop: isize,
    ) -> Result<Vec<V>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        let mut cmd = Command::new(name);
        cmd.arg(self.template.raw_key(key)?)
            .arg_int(start as i64)
            .arg_int(stop as i64);
        let items = self.template.execute(&cmd).await?.into_array()?;
        self.template.read_values(items)
    }

    /// <https://redis.io/commands/zrange> with scores.
    pub async fn zrange_with_scores<K: ?Sized, V>(
        &self,
        key: &K,
        start: isize,
        stop: isize,
    ) -> Result<Vec<(V, f64)>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        self.range_with_scores("ZRANGE", key, start, stop).await
    }

    /// <https://redis.io/commands/zrevrange> with scores.
    pub async fn zrevrange_with_scores<K: ?Sized, V>(
        &self,
        key: &K,
        start: isize,
        stop: isize,
    ) -> Result<Vec<(V, f64)>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        self.range_with_scores("ZREVRANGE", key, start, stop).await
    }

    async fn range_with_scores<K: ?Sized, V>(
        &self,
        name: &'static str,
        key: &K,
        start: isize,
        stop: isize,
    ) -> Result<Vec<(V, f64)>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        let mut cmd = Command::new(name);
        cmd.arg(self.template.raw_key(key)?)
            .arg_int(start as i64)
            .arg_int(stop as i64)
            .arg_static("WITHSCORES");
        let items = self.template.execute(&cmd).await?.into_array()?;
        scored_values(self.template, items)
    }

    /// <https://redis.io/commands/zrangebyscore>
    pub async fn zrangebyscore<K: ?Sized, V>(
        &self,
        key: &K,
        min: f64,
        max: f64,
        limit: Option<(usize, usize)>,
    ) -> Result<Vec<V>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        let mut cmd = Command::new("ZRANGEBYSCORE");
        cmd.arg(self.template.raw_key(key)?)
            .arg_double(min)
            .arg_double(max);
        if let Some((offset, count)) = limit {
            cmd.arg_static("LIMIT")
                .arg_uint(offset as u64)
                .arg_uint(count as u64);
        }
        let items = self.template.execute(&cmd).await?.into_array()?;
        self.template.read_values(items)
    }

    /// <https://redis.io/commands/zrevrangebyscore>
    ///
    /// Note the reversed argument order: `max` comes first, as in the
    /// underlying command.
    pub async fn zrevrangebyscore<K: ?Sized, V>(
        &self,
        key: &K,
        max: f64,
        min: f64,
        limit: Option<(usize, usize)>,
    ) -> Result<Vec<V>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        let mut cmd = Command::new("ZREVRANGEBYSCORE");
        cmd.arg(self.template.raw_key(key)?)
            .arg_double(max)
            .arg_double(min);
        if let Some((offset, count)) = limit {
            cmd.arg_static("LIMIT")
                .arg_uint(offset as u64)
                .arg_uint(count as u64);
        }
        let items = self.template.execute(&cmd).await?.into_array()?;
        self.template.read_values(items)
    }

    /// <https://redis.io/commands/zremrangebyrank>
    pub async fn zremrangebyrank<K: ?Sized>(
        &self,
        key: &K,
        start: isize,
        stop: isize,
    ) -> Result<usize, Error>
    where
        KS: Serializer<K>,
    {
        let mut cmd = Command::new("ZREMRANGEBYRANK");
        cmd.arg(self.template.raw_key(key)?)
            .arg_int(start as i64)
            .arg_int(stop as i64);
        Ok(self.template.execute(&cmd).await?.into_integer()? as usize)
    }

    /// <https://redis.io/commands/zremrangebyscore>
    pub async fn zremrangebyscore<K: ?Sized>(
        &self,
        key: &K,
        min: f64,
        max: f64,
    ) -> Result<usize, Error>
    where
        KS: Serializer<K>,
    {
        let mut cmd = Command::new("ZREMRANGEBYSCORE");
        cmd.arg(self.template.raw_key(key)?)
            .arg_double(min)
            .arg_double(max);
        Ok(self.template.execute(&cmd).await?.into_integer()? as usize)
    }

    /// <https://redis.io/commands/zpopmin>
    pub async fn zpopmin<K: ?Sized, V>(&self, key: &K) -> Result<Option<(V, f64)>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        self.pop_one("ZPOPMIN", key).await
    }

    /// <https://redis.io/commands/zpopmax>
    pub async fn zpopmax<K: ?Sized, V>(&self, key: &K) -> Result<Option<(V, f64)>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        self.pop_one("ZPOPMAX", key).await
    }

    async fn pop_one<K: ?Sized, V>(
        &self,
        name: &'static str,
        key: &K,
    ) -> Result<Option<(V, f64)>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        let mut cmd = Command::new(name);
        cmd.arg(self.template.raw_key(key)?);
        let items = self.template.execute(&cmd).await?.into_array()?;
        if items.is_empty() {
            return Ok(None);
        }
        let mut scored = scored_values(self.template, items)?;
        match scored.pop() {
            Some(entry) => Ok(Some(entry)),
            None => Ok(None),
        }
    }

    /// <https://redis.io/commands/zpopmin> with a count.
    pub async fn zpopmin_count<K: ?Sized, V>(
        &self,
        key: &K,
        count: usize,
    ) -> Result<Vec<(V, f64)>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        self.pop_many("ZPOPMIN", key, count).await
    }

    /// <https://redis.io/commands/zpopmax> with a count.
    pub async fn zpopmax_count<K: ?Sized, V>(
        &self,
        key: &K,
        count: usize,
    ) -> Result<Vec<(V, f64)>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        self.pop_many("ZPOPMAX", key, count).await
    }

    async fn pop_many<K: ?Sized, V>(
        &self,
        name: &'static str,
        key: &K,
        count: usize,
    ) -> Result<Vec<(V, f64)>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        let mut cmd = Command::new(name);
        cmd.arg(self.template.raw_key(key)?).arg_uint(count as u64);
        let items = self.template.execute(&cmd).await?.into_array()?;
        scored_values(self.template, items)
    }

    /// <https://redis.io/commands/zrandmember>
    pub async fn zrandmember<K: ?Sized, V>(&self, key: &K) -> Result<Option<V>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        let mut cmd = Command::new("ZRANDMEMBER");
        cmd.arg(self.template.raw_key(key)?);
        match self.template.execute(&cmd).await?.into_opt_blob()? {
            Some(raw) => Ok(Some(self.template.read_value(&raw)?)),
            None => Ok(None),
        }
    }

    /// <https://redis.io/commands/zunionstore>
    ///
    /// Returns the size of the stored result.
    pub async fn zunionstore<N: ?Sized, K>(
        &self,
        destination: &N,
        keys: &[K],
    ) -> Result<usize, Error>
    where
        KS: Serializer<N> + Serializer<K>,
    {
        self.combine_store("ZUNIONSTORE", destination, keys).await
    }

    /// <https://redis.io/commands/zinterstore>
    pub async fn zinterstore<N: ?Sized, K>(
        &self,
        destination: &N,
        keys: &[K],
    ) -> Result<usize, Error>
    where
        KS: Serializer<N> + Serializer<K>,
    {
        self.combine_store("ZINTERSTORE", destination, keys).await
    }

    /// <https://redis.io/commands/zdiffstore>
    pub async fn zdiffstore<N: ?Sized, K>(
        &self,
        destination: &N,
        keys: &[K],
    ) -> Result<usize, Error>
    where
        KS: Serializer<N> + Serializer<K>,
    {
        self.combine_store("ZDIFFSTORE", destination, keys).await
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
            return Err(
                ErrorKind::InvalidArgument("sorted set algebra requires at least one key").into(),
            );
        }
        let mut cmd = Command::new(name);
        cmd.arg(self.template.raw_key(destination)?)
            .arg_uint(keys.len() as u64);
        for key in keys {
            cmd.arg(self.template.raw_key(key)?);
        }
        Ok(self.template.execute(&cmd).await?.into_integer()? as usize)
    }

    /// <https://redis.io/commands/zscan>
    pub async fn zscan<K: ?Sized, V>(
        &self,
        key: &K,
        cursor: u64,
        match_pattern: Option<&str>,
        count: Option<usize>,
    ) -> Result<(u64, Vec<(V, f64)>), Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        let mut cmd = Command::new("ZSCAN");
        cmd.arg(self.template.raw_key(key)?).arg_uint(cursor);
        if let Some(pattern) = match_pattern {
            cmd.arg_static("MATCH").arg_str(pattern);
        }
        if let Some(count) = count {
            cmd.arg_static("COUNT").arg_uint(count as u64);
        }
        let (cursor, items) = super::scan_reply(self.template.execute(&cmd).await?)?;
        Ok((cursor, scored_values(self.template, items)?))
    }
}

/// Decodes member-score listings.
///
/// Depending on the command and protocol version these arrive either as a
/// flat alternating array or as an array of two-element arrays; both shapes
/// are accepted.
fn scored_values<KS, VS, C, V>(
    template: &Template<KS, VS, C>,
    items: Vec<Value>,
) -> Result<Vec<(V, f64)>, Error>
where
    C: Connector,
    VS: Deserializer<V>,
{
    if items.is_empty() {
        return Ok(vec![]);
    }

    if matches!(items[0], Value::Array(_)) {
        items
            .into_iter()
            .map(|pair| {
                let mut pair = pair.into_array()?;
                let score = pair.pop();
                let member = pair.pop();
                match (member, score) {
                    (Some(member), Some(score)) if pair.is_empty() => Ok((
                        template.read_value(&member.into_blob()?)?,
                        score.into_double()?,
                    )),
                    _ => Err(TypeError::other("member-score pair", "malformed pair").into()),
                }
            })
            .collect()
    } else {
        if items.len() % 2 != 0 {
            return Err(TypeError::other("member-score pairs", "odd-length array").into());
        }
        let mut scored = Vec::with_capacity(items.len() / 2);
        let mut items = items.into_iter();
        while let (Some(member), Some(score)) = (items.next(), items.next()) {
            scored.push((
                template.read_value(&member.into_blob()?)?,
                score.into_double()?,
            ));
        }
        Ok(scored)
    }
}

impl<'a, K: ?Sized, KS, VS, C: Connector> BoundZSetOps<'a, K, KS, VS, C>
where
    KS: Serializer<K>,
{
    pub(crate) fn new(ops: ZSetOps<'a, KS, VS, C>, key: &'a K) -> Self {
        BoundZSetOps { ops, key }
    }

    /// The key every call operates on.
    pub fn key(&self) -> &K {
        self.key
    }

    /// Bound [`zadd`](ZSetOps::zadd).
    pub async fn zadd<V: ?Sized>(&self, score: f64, member: &V) -> Result<bool, Error>
    where
        VS: Serializer<V>,
    {
        self.ops.zadd(self.key, score, member).await
    }

    /// Bound [`zadd_multi`](ZSetOps::zadd_multi).
    pub async fn zadd_multi<V>(&self, entries: &[(V, f64)]) -> Result<usize, Error>
    where
        VS: Serializer<V>,
    {
        self.ops.zadd_multi(self.key, entries).await
    }

    /// Bound [`zincrby`](ZSetOps::zincrby).
    pub async fn zincrby<V: ?Sized>(&self, delta: f64, member: &V) -> Result<f64, Error>
    where
        VS: Serializer<V>,
    {
        self.ops.zincrby(self.key, delta, member).await
    }

    /// Bound [`zrem`](ZSetOps::zrem).
    pub async fn zrem<V>(&self, members: &[V]) -> Result<usize, Error>
    where
        VS: Serializer<V>,
    {
        self.ops.zrem(self.key, members).await
    }

    /// Bound [`zscore`](ZSetOps::zscore).
    pub async fn zscore<V: ?Sized>(&self, member: &V) -> Result<Option<f64>, Error>
    where
        VS: Serializer<V>,
    {
        self.ops.zscore(self.key, member).await
    }

    /// Bound [`zmscore`](ZSetOps::zmscore).
    pub async fn zmscore<V>(&self, members: &[V]) -> Result<Vec<Option<f64>>, Error>
    where
        VS: Serializer<V>,
    {
        self.ops.zmscore(self.key, members).await
    }

    /// Bound [`zrank`](ZSetOps::zrank).
    pub async fn zrank<V: ?Sized>(&self, member: &V) -> Result<Option<u64>, Error>
    where
        VS: Serializer<V>,
    {
        self.ops.zrank(self.key, member).await
    }

    /// Bound [`zrevrank`](ZSetOps::zrevrank).
    pub async fn zrevrank<V: ?Sized>(&self, member: &V) -> Result<Option<u64>, Error>
    where
        VS: Serializer<V>,
    {
        self.ops.zrevrank(self.key, member).await
    }

    /// Bound [`zcard`](ZSetOps::zcard).
    pub async fn zcard(&self) -> Result<usize, Error> {
        self.ops.zcard(self.key).await
    }

    /// Bound [`zcount`](ZSetOps::zcount).
    pub async fn zcount(&self, min: f64, max: f64) -> Result<usize, Error> {
        self.ops.zcount(self.key, min, max).await
    }

    /// Bound [`zrange`](ZSetOps::zrange).
    pub async fn zrange<V>(&self, start: isize, stop: isize) -> Result<Vec<V>, Error>
    where
        VS: Deserializer<V>,
    {
        self.ops.zrange(self.key, start, stop).await
    }

    /// Bound [`zrevrange`](ZSetOps::zrevrange).
    pub async fn zrevrange<V>(&self, start: isize, stop: isize) -> Result<Vec<V>, Error>
    where
        VS: Deserializer<V>,
    {
        self.ops.zrevrange(self.key, start, stop).await
    }

    /// Bound [`zrange_with_scores`](ZSetOps::zrange_with_scores).
    pub async fn zrange_with_scores<V>(
        &self,
        start: isize,
        stop: isize,
    ) -> Result<Vec<(V, f64)>, Error>
    where
        VS: Deserializer<V>,
    {
        self.ops.zrange_with_scores(self.key, start, stop).await
    }

    /// Bound [`zrevrange_with_scores`](ZSetOps::zrevrange_with_scores).
    pub async fn zrevrange_with_scores<V>(
        &self,
        start: isize,
        stop: isize,
    ) -> Result<Vec<(V, f64)>, Error>
    where
        VS: Deserializer<V>,
    {
        self.ops.zrevrange_with_scores(self.key, start, stop).await
    }

    /// Bound [`zrangebyscore`](ZSetOps::zrangebyscore).
    pub async fn zrangebyscore<V>(
        &self,
        min: f64,
        max: f64,
        limit: Option<(usize, usize)>,
    ) -> Result<Vec<V>, Error>
    where
        VS: Deserializer<V>,
    {
        self.ops.zrangebyscore(self.key, min, max, limit).await
    }

    /// Bound [`zrevrangebyscore`](ZSetOps::zrevrangebyscore).
    pub async fn zrevrangebyscore<V>(
        &self,
        max: f64,
        min: f64,
        limit: Option<(usize, usize)>,
    ) -> Result<Vec<V>, Error>
    where
        VS: Deserializer<V>,
    {
        self.ops.zrevrangebyscore(self.key, max, min, limit).await
    }

    /// Bound [`zremrangebyrank`](ZSetOps::zremrangebyrank).
    pub async fn zremrangebyrank(&self, start: isize, stop: isize) -> Result<usize, Error> {
        self.ops.zremrangebyrank(self.key, start, stop).await
    }

    /// Bound [`zremrangebyscore`](ZSetOps::zremrangebyscore).
    pub async fn zremrangebyscore(&self, min: f64, max: f64) -> Result<usize, Error> {
        self.ops.zremrangebyscore(self.key, min, max).await
    }

    /// Bound [`zpopmin`](ZSetOps::zpopmin).
    pub async fn zpopmin<V>(&self) -> Result<Option<(V, f64)>, Error>
    where
        VS: Deserializer<V>,
    {
        self.ops.zpopmin(self.key).await
    }

    /// Bound [`zpopmax`](ZSetOps::zpopmax).
    pub async fn zpopmax<V>(&self) -> Result<Option<(V, f64)>, Error>
    where
        VS: Deserializer<V>,
    {
        self.ops.zpopmax(self.key).await
    }

    /// Bound [`zpopmin_count`](ZSetOps::zpopmin_count).
    pub async fn zpopmin_count<V>(&self, count: usize) -> Result<Vec<(V, f64)>, Error>
    where
        VS: Deserializer<V>,
    {
        self.ops.zpopmin_count(self.key, count).await
    }

    /// Bound [`zpopmax_count`](ZSetOps::zpopmax_count).
    pub async fn zpopmax_count<V>(&self, count: usize) -> Result<Vec<(V, f64)>, Error>
    where
        VS: Deserializer<V>,
    {
        self.ops.zpopmax_count(self.key, count).await
    }

    /// Bound [`zrandmember`](ZSetOps::zrandmember).
    pub async fn zrandmember<V>(&self) -> Result<Option<V>, Error>
    where
        VS: Deserializer<V>,
    {
        self.ops.zrandmember(self.key).await
    }

    /// Bound [`zscan`](ZSetOps::zscan).
    pub async fn zscan<V>(
        &self,
        cursor: u64,
        match_pattern: Option<&str>,
        count: Option<usize>,
    ) -> Result<(u64, Vec<(V, f64)>), Error>
    where
        VS: Deserializer<V>,
    {
        self.ops.zscan(self.key, cursor, match_pattern, count).await
    }
}
