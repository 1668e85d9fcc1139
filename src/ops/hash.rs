//! Operations on hashes.
//!
//! Hash fields go through the key serializer, hash values through the value
//! serializer, mirroring how keys and values are treated everywhere else.

use std::time::{Duration, SystemTime};

use crate::client::{Error, ErrorKind};
use crate::connector::Connector;
use crate::expiry::{Expiration, ExpiryCondition, FieldExpireOutcome, FieldPersistOutcome, TimeUnit};
use crate::resp::{Command, TypeError, Value};
use crate::serializer::{Deserializer, Serializer};
use crate::template::Template;

/// View over the hash commands.
///
/// Obtained from [`Template::hash_ops`](crate::Template::hash_ops).
#[derive(Debug)]
pub struct HashOps<'a, KS, VS, C: Connector> {
    template: &'a Template<KS, VS, C>,
}

/// [`HashOps`](HashOps) narrowed to one fixed key.
#[derive(Debug)]
pub struct BoundHashOps<'a, K: ?Sized, KS, VS, C: Connector> {
    ops: HashOps<'a, KS, VS, C>,
    key: &'a K,
}

impl<'a, KS, VS, C: Connector> HashOps<'a, KS, VS, C> {
    pub(crate) fn new(template: &'a Template<KS, VS, C>) -> Self {
        HashOps { template }
    }

    /// <https://redis.io/commands/hset> with a single field.
    ///
    /// Returns whether the field was newly created.
    ///
    /// ```
    /// # helper::with_template(|template| async move {
    /// # let key = "doctest_hash_hset_1";
    /// # template.del(&[key]).await?;
    /// let ops = template.hash_ops();
    /// let res = ops.hset(key, "field1", "foo").await?;
    /// assert!(res);
    /// let res = ops.hset(key, "field1", "bar").await?;
    /// assert!(!res);
    /// let res: Option<String> = ops.hget(key, "field1").await?;
    /// assert_eq!(Some("bar".to_owned()), res);
    /// # Ok(())})?; Ok::<(), helper::BoxError>(())
    /// ```
    pub async fn hset<K: ?Sized, F: ?Sized, V: ?Sized>(
        &self,
        key: &K,
        field: &F,
        value: &V,
    ) -> Result<bool, Error>
    where
        KS: Serializer<K> + Serializer<F>,
        VS: Serializer<V>,
    {
        let mut cmd = Command::new("HSET");
        cmd.arg(self.template.raw_key(key)?)
            .arg(self.template.raw_key(field)?)
            .arg(self.template.raw_value(value)?);
        self.template.execute(&cmd).await?.into_bool().map_err(Into::into)
    }

    /// <https://redis.io/commands/hset> with several fields.
    ///
    /// Returns how many fields were newly created.
    pub async fn hset_multi<K: ?Sized, F, V>(
        &self,
        key: &K,
        entries: &[(F, V)],
    ) -> Result<usize, Error>
    where
        KS: Serializer<K> + Serializer<F>,
        VS: Serializer<V>,
    {
        if entries.is_empty() {
            return Ok(0);
        }
        let mut cmd = Command::new("HSET");
        cmd.arg(self.template.raw_key(key)?);
        for (field, value) in entries {
            cmd.arg(self.template.raw_key(field)?)
                .arg(self.template.raw_value(value)?);
        }
        Ok(self.template.execute(&cmd).await?.into_integer()? as usize)
    }

    /// <https://redis.io/commands/hsetnx>
    pub async fn hsetnx<K: ?Sized, F: ?Sized, V: ?Sized>(
        &self,
        key: &K,
        field: &F,
        value: &V,
    ) -> Result<bool, Error>
    where
        KS: Serializer<K> + Serializer<F>,
        VS: Serializer<V>,
    {
        let mut cmd = Command::new("HSETNX");
        cmd.arg(self.template.raw_key(key)?)
            .arg(self.template.raw_key(field)?)
            .arg(self.template.raw_value(value)?);
        self.template.execute(&cmd).await?.into_bool().map_err(Into::into)
    }

    /// <https://redis.io/commands/hget>
    pub async fn hget<K: ?Sized, F: ?Sized, V>(&self, key: &K, field: &F) -> Result<Option<V>, Error>
    where
        KS: Serializer<K> + Serializer<F>,
        VS: Deserializer<V>,
    {
        let mut cmd = Command::new("HGET");
        cmd.arg(self.template.raw_key(key)?)
            .arg(self.template.raw_key(field)?);
        match self.template.execute(&cmd).await?.into_opt_blob()? {
            Some(raw) => Ok(Some(self.template.read_value(&raw)?)),
            None => Ok(None),
        }
    }

    /// <https://redis.io/commands/hmget>
    ///
    /// One optional value per queried field, in order.
    pub async fn hmget<K: ?Sized, F, V>(
        &self,
        key: &K,
        fields: &[F],
    ) -> Result<Vec<Option<V>>, Error>
    where
        KS: Serializer<K> + Serializer<F>,
        VS: Deserializer<V>,
    {
        if fields.is_empty() {
            return Ok(vec![]);
        }
        let mut cmd = Command::new("HMGET");
        cmd.arg(self.template.raw_key(key)?);
        for field in fields {
            cmd.arg(self.template.raw_key(field)?);
        }
        let items = self.template.execute(&cmd).await?.into_array()?;
        self.template.read_opt_values(items)
    }

    /// <https://redis.io/commands/hgetall>
    ///
    /// ```
    /// # helper::with_template(|template| async move {
    /// # let key = "doctest_hash_hgetall_1";
    /// let ops = template.hash_ops();
    /// ops.hset_multi(key, &[("field1", "Hello"), ("field2", "World")]).await?;
    /// let mut res: Vec<(String, String)> = ops.hgetall(key).await?;
    /// res.sort();
    /// assert_eq!(
    ///     vec![
    ///         ("field1".to_owned(), "Hello".to_owned()),
    ///         ("field2".to_owned(), "World".to_owned()),
    ///     ],
    ///     res,
    /// );
    /// # Ok(())})?; Ok::<(), helper::BoxError>(())
    /// ```
    pub async fn hgetall<K: ?Sized, F, V>(&self, key: &K) -> Result<Vec<(F, V)>, Error>
    where
        KS: Serializer<K> + Deserializer<F>,
        VS: Deserializer<V>,
    {
        let mut cmd = Command::new("HGETALL");
        cmd.arg(self.template.raw_key(key)?);
        let pairs = self.template.execute(&cmd).await?.into_pairs()?;
        pairs
            .into_iter()
            .map(|(field, value)| {
                Ok((
                    self.template.read_key(field.as_ref())?,
                    self.template.read_value(&value.into_blob()?)?,
                ))
            })
            .collect()
    }

    /// <https://redis.io/commands/hkeys>
    pub async fn hkeys<K: ?Sized, F>(&self, key: &K) -> Result<Vec<F>, Error>
    where
        KS: Serializer<K> + Deserializer<F>,
    {
        let mut cmd = Command::new("HKEYS");
        cmd.arg(self.template.raw_key(key)?);
        self.template
            .execute(&cmd)
            .await?
            .into_array()?
            .into_iter()
            .map(|item| self.template.read_key(&item.into_blob()?))
            .collect()
    }

    /// <https://redis.io/commands/hvals>
    pub async fn hvals<K: ?Sized, V>(&self, key: &K) -> Result<Vec<V>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        let mut cmd = Command::new("HVALS");
        cmd.arg(self.template.raw_key(key)?);
        let items = self.template.execute(&cmd).await?.into_array()?;
        self.template.read_values(items)
    }

    /// <https://redis.io/commands/hdel>
    pub async fn hdel<K: ?Sized, F>(&self, key: &K, fields: &[F]) -> Result<usize, Error>
    where
        KS: Serializer<K> + Serializer<F>,
    {
        if fields.is_empty() {
            return Ok(0);
        }
        let mut cmd = Command::new("HDEL");
        cmd.arg(self.template.raw_key(key)?);
        for field in fields {
            cmd.arg(self.template.raw_key(field)?);
        }
        Ok(self.template.execute(&cmd).await?.into_integer()? as usize)
    }

    /// <https://redis.io/commands/hexists>
    pub async fn hexists<K: ?Sized, F: ?Sized>(&self, key: &K, field: &F) -> Result<bool, Error>
    where
        KS: Serializer<K> + Serializer<F>,
    {
        let mut cmd = Command::new("HEXISTS");
        cmd.arg(self.template.raw_key(key)?)
            .arg(self.template.raw_key(field)?);
        self.template.execute(&cmd).await?.into_bool().map_err(Into::into)
    }

    /// <https://redis.io/commands/hlen>
    pub async fn hlen<K: ?Sized>(&self, key: &K) -> Result<usize, Error>
    where
        KS: Serializer<K>,
    {
        let mut cmd = Command::new("HLEN");
        cmd.arg(self.template.raw_key(key)?);
        Ok(self.template.execute(&cmd).await?.into_integer()? as usize)
    }

    /// <https://redis.io/commands/hstrlen>
    pub async fn hstrlen<K: ?Sized, F: ?Sized>(&self, key: &K, field: &F) -> Result<usize, Error>
    where
        KS: Serializer<K> + Serializer<F>,
    {
        let mut cmd = Command::new("HSTRLEN");
        cmd.arg(self.template.raw_key(key)?)
            .arg(self.template.raw_key(field)?);
        Ok(self.template.execute(&cmd).await?.into_integer()? as usize)
    }

    /// <https://redis.io/commands/hincrby>
    pub async fn hincrby<K: ?Sized, F: ?Sized>(
        &self,
        key: &K,
        field: &F,
        increment: i64,
    ) -> Result<i64, Error>
    where
        KS: Serializer<K> + Serializer<F>,
    {
        let mut cmd = Command::new("HINCRBY");
        cmd.arg(self.template.raw_key(key)?)
            .arg(self.template.raw_key(field)?)
            .arg_int(increment);
        self.template.execute(&cmd).await?.into_integer().map_err(Into::into)
    }

    /// <https://redis.io/commands/hincrbyfloat>
    pub async fn hincrbyfloat<K: ?Sized, F: ?Sized>(
        &self,
        key: &K,
        field: &F,
        increment: f64,
    ) -> Result<f64, Error>
    where
        KS: Serializer<K> + Serializer<F>,
    {
        let mut cmd = Command::new("HINCRBYFLOAT");
        cmd.arg(self.template.raw_key(key)?)
            .arg(self.template.raw_key(field)?)
            .arg_double(increment);
        self.template.execute(&cmd).await?.into_double().map_err(Into::into)
    }

    /// <https://redis.io/commands/hrandfield>
    pub async fn hrandfield<K: ?Sized, F>(&self, key: &K) -> Result<Option<F>, Error>
    where
        KS: Serializer<K> + Deserializer<F>,
    {
        let mut cmd = Command::new("HRANDFIELD");
        cmd.arg(self.template.raw_key(key)?);
        match self.template.execute(&cmd).await?.into_opt_blob()? {
            Some(raw) => Ok(Some(self.template.read_key(&raw)?)),
            None => Ok(None),
        }
    }

    /// <https://redis.io/commands/hrandfield> with a count.
    ///
    /// A negative count may repeat fields.
    pub async fn hrandfield_count<K: ?Sized, F>(&self, key: &K, count: isize) -> Result<Vec<F>, Error>
    where
        KS: Serializer<K> + Deserializer<F>,
    {
        let mut cmd = Command::new("HRANDFIELD");
        cmd.arg(self.template.raw_key(key)?).arg_int(count as i64);
        self.template
            .execute(&cmd)
            .await?
            .into_array()?
            .into_iter()
            .map(|item| self.template.read_key(&item.into_blob()?))
            .collect()
    }

    /// <https://redis.io/commands/hscan>
    pub async fn hscan<K: ?Sized, F, V>(
        &self,
        key: &K,
        cursor: u64,
        match_pattern: Option<&str>,
        count: Option<usize>,
    ) -> Result<(u64, Vec<(F, V)>), Error>
    where
        KS: Serializer<K> + Deserializer<F>,
        VS: Deserializer<V>,
    {
        let mut cmd = Command::new("HSCAN");
        cmd.arg(self.template.raw_key(key)?).arg_uint(cursor);
        if let Some(pattern) = match_pattern {
            cmd.arg_static("MATCH").arg_str(pattern);
        }
        if let Some(count) = count {
            cmd.arg_static("COUNT").arg_uint(count as u64);
        }
        let (cursor, items) = super::scan_reply(self.template.execute(&cmd).await?)?;
        let pairs = Value::Array(items).into_pairs()?;
        let mut entries = Vec::with_capacity(pairs.len());
        for (field, value) in pairs {
            entries.push((
                self.template.read_key(field.as_ref())?,
                self.template.read_value(&value.into_blob()?)?,
            ));
        }
        Ok((cursor, entries))
    }

    /// <https://redis.io/commands/hpexpire>
    ///
    /// Despite the name, this method uses `HPEXPIRE`, not `HEXPIRE`, for
    /// millisecond-level accuracy. One outcome per field, in order.
    pub async fn hexpire<K: ?Sized, F>(
        &self,
        key: &K,
        timeout: Duration,
        condition: Option<ExpiryCondition>,
        fields: &[F],
    ) -> Result<Vec<FieldExpireOutcome>, Error>
    where
        KS: Serializer<K> + Serializer<F>,
    {
        let mut cmd = Command::new("HPEXPIRE");
        cmd.arg(self.template.raw_key(key)?)
            .arg_uint(timeout.as_millis() as u64);
        self.field_expire(cmd, condition, fields).await
    }

    /// <https://redis.io/commands/hpexpireat>
    pub async fn hexpire_at<K: ?Sized, F>(
        &self,
        key: &K,
        deadline: SystemTime,
        condition: Option<ExpiryCondition>,
        fields: &[F],
    ) -> Result<Vec<FieldExpireOutcome>, Error>
    where
        KS: Serializer<K> + Serializer<F>,
    {
        let unix = deadline
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or(Duration::ZERO);
        let mut cmd = Command::new("HPEXPIREAT");
        cmd.arg(self.template.raw_key(key)?)
            .arg_uint(unix.as_millis() as u64);
        self.field_expire(cmd, condition, fields).await
    }

    async fn field_expire<F>(
        &self,
        mut cmd: Command,
        condition: Option<ExpiryCondition>,
        fields: &[F],
    ) -> Result<Vec<FieldExpireOutcome>, Error>
    where
        KS: Serializer<F>,
    {
        if let Some(condition) = condition {
            cmd.arg_static(condition.keyword());
        }
        self.push_fields(&mut cmd, fields)?;
        self.template
            .execute(&cmd)
            .await?
            .into_array()?
            .into_iter()
            .map(|item| {
                let code = item.into_integer()?;
                FieldExpireOutcome::from_code(code)
                    .ok_or_else(|| TypeError::other("field expire code", code).into())
            })
            .collect()
    }

    /// <https://redis.io/commands/hpersist>
    ///
    /// One outcome per field, in order.
    pub async fn hpersist<K: ?Sized, F>(
        &self,
        key: &K,
        fields: &[F],
    ) -> Result<Vec<FieldPersistOutcome>, Error>
    where
        KS: Serializer<K> + Serializer<F>,
    {
        let mut cmd = Command::new("HPERSIST");
        cmd.arg(self.template.raw_key(key)?);
        self.push_fields(&mut cmd, fields)?;
        self.template
            .execute(&cmd)
            .await?
            .into_array()?
            .into_iter()
            .map(|item| {
                let code = item.into_integer()?;
                FieldPersistOutcome::from_code(code)
                    .ok_or_else(|| TypeError::other("field persist code", code).into())
            })
            .collect()
    }

    /// <https://redis.io/commands/hpttl>
    ///
    /// Despite the name, this method uses `HPTTL`, not `HTTL`, for
    /// millisecond-level accuracy. One [`Expiration`] per field, in order;
    /// fields without an expiry report
    /// [`Expiration::Persistent`](Expiration::Persistent) and unknown fields
    /// [`Expiration::Missing`](Expiration::Missing).
    pub async fn httl<K: ?Sized, F>(&self, key: &K, fields: &[F]) -> Result<Vec<Expiration>, Error>
    where
        KS: Serializer<K> + Serializer<F>,
    {
        let mut cmd = Command::new("HPTTL");
        cmd.arg(self.template.raw_key(key)?);
        self.push_fields(&mut cmd, fields)?;
        self.template
            .execute(&cmd)
            .await?
            .into_array()?
            .into_iter()
            .map(|item| {
                Ok(Expiration::from_code(
                    item.into_integer()?,
                    TimeUnit::Milliseconds,
                ))
            })
            .collect()
    }

    fn push_fields<F>(&self, cmd: &mut Command, fields: &[F]) -> Result<(), Error>
    where
        KS: Serializer<F>,
    {
        if fields.is_empty() {
            return Err(
                ErrorKind::InvalidArgument("field expiry requires at least one field").into(),
            );
        }
        cmd.arg_static("FIELDS").arg_uint(fields.len() as u64);
        for field in fields {
            cmd.arg(self.template.raw_key(field)?);
        }
        Ok(())
    }
}

impl<'a, K: ?Sized, KS, VS, C: Connector> BoundHashOps<'a, K, KS, VS, C>
where
    KS: Serializer<K>,
{
    pub(crate) fn new(ops: HashOps<'a, KS, VS, C>, key: &'a K) -> Self {
        BoundHashOps { ops, key }
    }

    /// The key every call operates on.
    pub fn key(&self) -> &K {
        self.key
    }

    /// Bound [`hset`](HashOps::hset).
    pub async fn hset<F: ?Sized, V: ?Sized>(&self, field: &F, value: &V) -> Result<bool, Error>
    where
        KS: Serializer<F>,
        VS: Serializer<V>,
    {
        self.ops.hset(self.key, field, value).await
    }

    /// Bound [`hset_multi`](HashOps::hset_multi).
    pub async fn hset_multi<F, V>(&self, entries: &[(F, V)]) -> Result<usize, Error>
    where
        KS: Serializer<F>,
        VS: Serializer<V>,
    {
        self.ops.hset_multi(self.key, entries).await
    }

    /// Bound [`hsetnx`](HashOps::hsetnx).
    pub async fn hsetnx<F: ?Sized, V: ?Sized>(&self, field: &F, value: &V) -> Result<bool, Error>
    where
        KS: Serializer<F>,
        VS: Serializer<V>,
    {
        self.ops.hsetnx(self.key, field, value).await
    }

    /// Bound [`hget`](HashOps::hget).
    pub async fn hget<F: ?Sized, V>(&self, field: &F) -> Result<Option<V>, Error>
    where
        KS: Serializer<F>,
        VS: Deserializer<V>,
    {
        self.ops.hget(self.key, field).await
    }

    /// Bound [`hmget`](HashOps::hmget).
    pub async fn hmget<F, V>(&self, fields: &[F]) -> Result<Vec<Option<V>>, Error>
    where
        KS: Serializer<F>,
        VS: Deserializer<V>,
    {
        self.ops.hmget(self.key, fields).await
    }

    /// Bound [`hgetall`](HashOps::hgetall).
    pub async fn hgetall<F, V>(&self) -> Result<Vec<(F, V)>, Error>
    where
        KS: Deserializer<F>,
        VS: Deserializer<V>,
    {
        self.ops.hgetall(self.key).await
    }

    /// Bound [`hkeys`](HashOps::hkeys).
    pub async fn hkeys<F>(&self) -> Result<Vec<F>, Error>
    where
        KS: Deserializer<F>,
    {
        self.ops.hkeys(self.key).await
    }

    /// Bound [`hvals`](HashOps::hvals).
    pub async fn hvals<V>(&self) -> Result<Vec<V>, Error>
    where
        VS: Deserializer<V>,
    {
        self.ops.hvals(self.key).await
    }

    /// Bound [`hdel`](HashOps::hdel).
    pub async fn hdel<F>(&self, fields: &[F]) -> Result<usize, Error>
    where
        KS: Serializer<F>,
    {
        self.ops.hdel(self.key, fields).await
    }

    /// Bound [`hexists`](HashOps::hexists).
    pub async fn hexists<F: ?Sized>(&self, field: &F) -> Result<bool, Error>
    where
        KS: Serializer<F>,
    {
        self.ops.hexists(self.key, field).await
    }

    /// Bound [`hlen`](HashOps::hlen).
    pub async fn hlen(&self) -> Result<usize, Error> {
        self.ops.hlen(self.key).await
    }

    /// Bound [`hstrlen`](HashOps::hstrlen).
    pub async fn hstrlen<F: ?Sized>(&self, field: &F) -> Result<usize, Error>
    where
        KS: Serializer<F>,
    {
        self.ops.hstrlen(self.key, field).await
    }

    /// Bound [`hincrby`](HashOps::hincrby).
    pub async fn hincrby<F: ?Sized>(&self, field: &F, increment: i64) -> Result<i64, Error>
    where
        KS: Serializer<F>,
    {
        self.ops.hincrby(self.key, field, increment).await
    }

    /// Bound [`hincrbyfloat`](HashOps::hincrbyfloat).
    pub async fn hincrbyfloat<F: ?Sized>(&self, field: &F, increment: f64) -> Result<f64, Error>
    where
        KS: Serializer<F>,
    {
        self.ops.hincrbyfloat(self.key, field, increment).await
    }

    /// Bound [`hrandfield`](HashOps::hrandfield).
    pub async fn hrandfield<F>(&self) -> Result<Option<F>, Error>
    where
        KS: Deserializer<F>,
    {
        self.ops.hrandfield(self.key).await
    }

    /// Bound [`hrandfield_count`](HashOps::hrandfield_count).
    pub async fn hrandfield_count<F>(&self, count: isize) -> Result<Vec<F>, Error>
    where
        KS: Deserializer<F>,
    {
        self.ops.hrandfield_count(self.key, count).await
    }

    /// Bound [`hscan`](HashOps::hscan).
    pub async fn hscan<F, V>(
        &self,
        cursor: u64,
        match_pattern: Option<&str>,
        count: Option<usize>,
    ) -> Result<(u64, Vec<(F, V)>), Error>
    where
        KS: Deserializer<F>,
        VS: Deserializer<V>,
    {
        self.ops.hscan(self.key, cursor, match_pattern, count).await
    }

    /// Bound [`hexpire`](HashOps::hexpire).
    pub async fn hexpire<F>(
        &self,
        timeout: Duration,
        condition: Option<ExpiryCondition>,
        fields: &[F],
    ) -> Result<Vec<FieldExpireOutcome>, Error>
    where
        KS: Serializer<F>,
    {
        self.ops.hexpire(self.key, timeout, condition, fields).await
    }

    /// Bound [`hexpire_at`](HashOps::hexpire_at).
    pub async fn hexpire_at<F>(
        &self,
        deadline: SystemTime,
        condition: Option<ExpiryCondition>,
        fields: &[F],
    ) -> Result<Vec<FieldExpireOutcome>, Error>
    where
        KS: Serializer<F>,
    {
        self.ops
            .hexpire_at(self.key, deadline, condition, fields)
            .await
    }

    /// Bound [`hpersist`](HashOps::hpersist).
    pub async fn hpersist<F>(&self, fields: &[F]) -> Result<Vec<FieldPersistOutcome>, Error>
    where
        KS: Serializer<F>,
    {
        self.ops.hpersist(self.key, fields).await
    }

    /// Bound [`httl`](HashOps::httl).
    pub async fn httl<F>(&self, fields: &[F]) -> Result<Vec<Expiration>, Error>
    where
        KS: Serializer<F>,
    {
        self.ops.httl(self.key, fields).await
    }
}
