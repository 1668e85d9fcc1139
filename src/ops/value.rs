//! Operations on string values.

use std::time::Duration;

use crate::client::Error;
use crate::connector::Connector;
use crate::resp::Command;
use crate::serializer::{Deserializer, Serializer};
use crate::template::Template;

/// View over the string commands.
///
/// Obtained from [`Template::value_ops`](crate::Template::value_ops).
#[derive(Debug)]
pub struct ValueOps<'a, KS, VS, C: Connector> {
    template: &'a Template<KS, VS, C>,
}

/// [`ValueOps`](ValueOps) narrowed to one fixed key.
///
/// Obtained from [`Template::bound_value_ops`](crate::Template::bound_value_ops).
#[derive(Debug)]
pub struct BoundValueOps<'a, K: ?Sized, KS, VS, C: Connector> {
    ops: ValueOps<'a, KS, VS, C>,
    key: &'a K,
}

/// Modifiers for [`set_with`](ValueOps::set_with).
#[derive(Debug, Clone, Copy, Default)]
pub struct SetOptions {
    expiry: Option<Duration>,
    keep_ttl: bool,
    if_absent: bool,
    if_present: bool,
}

impl SetOptions {
    pub fn new() -> Self {
        SetOptions::default()
    }

    /// Expire the key after the given duration (`PX`).
    pub fn expire(mut self, after: Duration) -> Self {
        self.expiry = Some(after);
        self
    }

    /// Keep the expiry the key already carries (`KEEPTTL`).
    pub fn keep_ttl(mut self) -> Self {
        self.keep_ttl = true;
        self
    }

    /// Only write when the key does not exist yet (`NX`).
    pub fn if_absent(mut self) -> Self {
        self.if_absent = true;
        self
    }

    /// Only write when the key already exists (`XX`).
    pub fn if_present(mut self) -> Self {
        self.if_present = true;
        self
    }

    fn encode(&self, cmd: &mut Command) {
        if let Some(after) = self.expiry {
            cmd.arg_static("PX").arg_uint(after.as_millis() as u64);
        }
        if self.keep_ttl {
            cmd.arg_static("KEEPTTL");
        }
        if self.if_absent {
            cmd.arg_static("NX");
        }
        if self.if_present {
            cmd.arg_static("XX");
        }
    }
}

impl<'a, KS, VS, C: Connector> ValueOps<'a, KS, VS, C> {
    pub(crate) fn new(template: &'a Template<KS, VS, C>) -> Self {
        ValueOps { template }
    }

    /// <https://redis.io/commands/set>
    ///
    /// ```
    /// # helper::with_template(|template| async move {
    /// # let key = "doctest_value_set_1";
    /// let ops = template.value_ops();
    /// ops.set(key, "Hello").await?;
    /// let res: Option<String> = ops.get(key).await?;
    /// assert_eq!(Some("Hello".to_owned()), res);
    /// # Ok(())})?; Ok::<(), helper::BoxError>(())
    /// ```
    pub async fn set<K: ?Sized, V: ?Sized>(&self, key: &K, value: &V) -> Result<(), Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V>,
    {
        let mut cmd = Command::new("SET");
        cmd.arg(self.template.raw_key(key)?)
            .arg(self.template.raw_value(value)?);
        self.template.execute(&cmd).await?.into_ok().map_err(Into::into)
    }

    /// <https://redis.io/commands/set> with modifiers.
    ///
    /// Returns whether the write happened, which only matters together with
    /// [`SetOptions::if_absent`] or [`SetOptions::if_present`].
    pub async fn set_with<K: ?Sized, V: ?Sized>(
        &self,
        key: &K,
        value: &V,
        options: SetOptions,
    ) -> Result<bool, Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V>,
    {
        let mut cmd = Command::new("SET");
        cmd.arg(self.template.raw_key(key)?)
            .arg(self.template.raw_value(value)?);
        options.encode(&mut cmd);
        self.template
            .execute(&cmd)
            .await?
            .into_ok_or_null()
            .map_err(Into::into)
    }

    /// Shorthand for a `NX` write.
    ///
    /// ```
    /// # helper::with_template(|template| async move {
    /// # let key = "doctest_value_setnx_1";
    /// # template.del(&[key]).await?;
    /// let ops = template.value_ops();
    /// let res = ops.set_nx(key, "first").await?;
    /// assert!(res);
    /// let res = ops.set_nx(key, "second").await?;
    /// assert!(!res);
    /// let res: Option<String> = ops.get(key).await?;
    /// assert_eq!(Some("first".to_owned()), res);
    /// # Ok(())})?; Ok::<(), helper::BoxError>(())
    /// ```
    pub async fn set_nx<K: ?Sized, V: ?Sized>(&self, key: &K, value: &V) -> Result<bool, Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V>,
    {
        self.set_with(key, value, SetOptions::new().if_absent()).await
    }

    /// Shorthand for a write with an expiry.
    pub async fn set_ex<K: ?Sized, V: ?Sized>(
        &self,
        key: &K,
        value: &V,
        expiry: Duration,
    ) -> Result<(), Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V>,
    {
        self.set_with(key, value, SetOptions::new().expire(expiry))
            .await
            .map(|_| ())
    }

    /// <https://redis.io/commands/get>
    pub async fn get<K: ?Sized, V>(&self, key: &K) -> Result<Option<V>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        let mut cmd = Command::new("GET");
        cmd.arg(self.template.raw_key(key)?);
        self.read_opt(self.template.execute(&cmd).await?)
    }

    /// <https://redis.io/commands/getdel>
    pub async fn get_del<K: ?Sized, V>(&self, key: &K) -> Result<Option<V>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        let mut cmd = Command::new("GETDEL");
        cmd.arg(self.template.raw_key(key)?);
        self.read_opt(self.template.execute(&cmd).await?)
    }

    /// <https://redis.io/commands/getset>
    ///
    /// Writes the new value and returns the previous one.
    pub async fn get_set<K: ?Sized, V: ?Sized, R>(&self, key: &K, value: &V) -> Result<Option<R>, Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V> + Deserializer<R>,
    {
        let mut cmd = Command::new("GETSET");
        cmd.arg(self.template.raw_key(key)?)
            .arg(self.template.raw_value(value)?);
        self.read_opt(self.template.execute(&cmd).await?)
    }

    /// <https://redis.io/commands/append>
    ///
    /// Returns the length of the value after appending.
    pub async fn append<K: ?Sized, V: ?Sized>(&self, key: &K, value: &V) -> Result<usize, Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V>,
    {
        let mut cmd = Command::new("APPEND");
        cmd.arg(self.template.raw_key(key)?)
            .arg(self.template.raw_value(value)?);
        Ok(self.template.execute(&cmd).await?.into_integer()? as usize)
    }

    /// <https://redis.io/commands/strlen>
    pub async fn strlen<K: ?Sized>(&self, key: &K) -> Result<usize, Error>
    where
        KS: Serializer<K>,
    {
        let mut cmd = Command::new("STRLEN");
        cmd.arg(self.template.raw_key(key)?);
        Ok(self.template.execute(&cmd).await?.into_integer()? as usize)
    }

    /// <https://redis.io/commands/getrange>
    ///
    /// Negative offsets count from the end of the value.
    pub async fn getrange<K: ?Sized, V>(&self, key: &K, start: isize, end: isize) -> Result<V, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        let mut cmd = Command::new("GETRANGE");
        cmd.arg(self.template.raw_key(key)?)
            .arg_int(start as i64)
            .arg_int(end as i64);
        let raw = self.template.execute(&cmd).await?.into_blob()?;
        self.template.read_value(&raw)
    }

    /// <https://redis.io/commands/setrange>
    ///
    /// Returns the length of the value after the write.
    pub async fn setrange<K: ?Sized, V: ?Sized>(
        &self,
        key: &K,
        offset: usize,
        value: &V,
    ) -> Result<usize, Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V>,
    {
        let mut cmd = Command::new("SETRANGE");
        cmd.arg(self.template.raw_key(key)?)
            .arg_uint(offset as u64)
            .arg(self.template.raw_value(value)?);
        Ok(self.template.execute(&cmd).await?.into_integer()? as usize)
    }

    /// <https://redis.io/commands/incr>
    ///
    /// ```
    /// # helper::with_template(|template| async move {
    /// # let key = "doctest_value_incr_1";
    /// let ops = template.value_ops();
    /// ops.set(key, "10").await?;
    /// let res = ops.incr(key).await?;
    /// assert_eq!(11, res);
    /// # Ok(())})?; Ok::<(), helper::BoxError>(())
    /// ```
    pub async fn incr<K: ?Sized>(&self, key: &K) -> Result<i64, Error>
    where
        KS: Serializer<K>,
    {
        let mut cmd = Command::new("INCR");
        cmd.arg(self.template.raw_key(key)?);
        self.template.execute(&cmd).await?.into_integer().map_err(Into::into)
    }

    /// <https://redis.io/commands/incrby>
    pub async fn incrby<K: ?Sized>(&self, key: &K, increment: i64) -> Result<i64, Error>
    where
        KS: Serializer<K>,
    {
        let mut cmd = Command::new("INCRBY");
        cmd.arg(self.template.raw_key(key)?).arg_int(increment);
        self.template.execute(&cmd).await?.into_integer().map_err(Into::into)
    }

    /// <https://redis.io/commands/incrbyfloat>
    pub async fn incrbyfloat<K: ?Sized>(&self, key: &K, increment: f64) -> Result<f64, Error>
    where
        KS: Serializer<K>,
    {
        let mut cmd = Command::new("INCRBYFLOAT");
        cmd.arg(self.template.raw_key(key)?).arg_double(increment);
        self.template.execute(&cmd).await?.into_double().map_err(Into::into)
    }

    /// <https://redis.io/commands/decr>
    pub async fn decr<K: ?Sized>(&self, key: &K) -> Result<i64, Error>
    where
        KS: Serializer<K>,
    {
        let mut cmd = Command::new("DECR");
        cmd.arg(self.template.raw_key(key)?);
        self.template.execute(&cmd).await?.into_integer().map_err(Into::into)
    }

    /// <https://redis.io/commands/decrby>
    pub async fn decrby<K: ?Sized>(&self, key: &K, decrement: i64) -> Result<i64, Error>
    where
        KS: Serializer<K>,
    {
        let mut cmd = Command::new("DECRBY");
        cmd.arg(self.template.raw_key(key)?).arg_int(decrement);
        self.template.execute(&cmd).await?.into_integer().map_err(Into::into)
    }

    /// <https://redis.io/commands/mget>
    ///
    /// Missing keys come back as `None` at their position.
    ///
    /// ```
    /// # helper::with_template(|template| async move {
    /// # let key1 = "doctest_value_mget_1";
    /// # let key2 = "doctest_value_mget_2";
    /// let ops = template.value_ops();
    /// ops.set(key1, "Hello").await?;
    /// ops.set(key2, "World").await?;
    /// let res: Vec<Option<String>> = ops.mget(&[key1, key2, "nosuchkey"]).await?;
    /// assert_eq!(
    ///     vec![Some("Hello".to_owned()), Some("World".to_owned()), None],
    ///     res,
    /// );
    /// # Ok(())})?; Ok::<(), helper::BoxError>(())
    /// ```
    pub async fn mget<K, V>(&self, keys: &[K]) -> Result<Vec<Option<V>>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        if keys.is_empty() {
            return Ok(vec![]);
        }
        let mut cmd = Command::new("MGET");
        for key in keys {
            cmd.arg(self.template.raw_key(key)?);
        }
        let items = self.template.execute(&cmd).await?.into_array()?;
        self.template.read_opt_values(items)
    }

    /// <https://redis.io/commands/mset>
    pub async fn mset<K, V>(&self, entries: &[(K, V)]) -> Result<(), Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V>,
    {
        if entries.is_empty() {
            return Ok(());
        }
        let mut cmd = Command::new("MSET");
        for (key, value) in entries {
            cmd.arg(self.template.raw_key(key)?)
                .arg(self.template.raw_value(value)?);
        }
        self.template.execute(&cmd).await?.into_ok().map_err(Into::into)
    }

    /// <https://redis.io/commands/msetnx>
    ///
    /// Either every key is written or none is.
    pub async fn msetnx<K, V>(&self, entries: &[(K, V)]) -> Result<bool, Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V>,
    {
        if entries.is_empty() {
            return Ok(true);
        }
        let mut cmd = Command::new("MSETNX");
        for (key, value) in entries {
            cmd.arg(self.template.raw_key(key)?)
                .arg(self.template.raw_value(value)?);
        }
        self.template.execute(&cmd).await?.into_bool().map_err(Into::into)
    }

    fn read_opt<V>(&self, reply: crate::resp::Value) -> Result<Option<V>, Error>
    where
        VS: Deserializer<V>,
    {
        match reply.into_opt_blob()? {
            Some(raw) => Ok(Some(self.template.read_value(&raw)?)),
            None => Ok(None),
        }
    }
}

impl<'a, K: ?Sized, KS, VS, C: Connector> BoundValueOps<'a, K, KS, VS, C>
where
    KS: Serializer<K>,
{
    pub(crate) fn new(ops: ValueOps<'a, KS, VS, C>, key: &'a K) -> Self {
        BoundValueOps { ops, key }
    }

    /// The key every call operates on.
    pub fn key(&self) -> &K {
        self.key
    }

    /// Bound [`set`](ValueOps::set).
    ///
    /// ```
    /// # helper::with_template(|template| async move {
    /// # let key = "doctest_bound_value_1";
    /// let ops = template.bound_value_ops(key);
    /// ops.set("Hello").await?;
    /// let res: Option<String> = ops.get().await?;
    /// assert_eq!(Some("Hello".to_owned()), res);
    /// # Ok(())})?; Ok::<(), helper::BoxError>(())
    /// ```
    pub async fn set<V: ?Sized>(&self, value: &V) -> Result<(), Error>
    where
        VS: Serializer<V>,
    {
        self.ops.set(self.key, value).await
    }

    /// Bound [`set_with`](ValueOps::set_with).
    pub async fn set_with<V: ?Sized>(&self, value: &V, options: SetOptions) -> Result<bool, Error>
    where
        VS: Serializer<V>,
    {
        self.ops.set_with(self.key, value, options).await
    }

    /// Bound [`set_nx`](ValueOps::set_nx).
    pub async fn set_nx<V: ?Sized>(&self, value: &V) -> Result<bool, Error>
    where
        VS: Serializer<V>,
    {
        self.ops.set_nx(self.key, value).await
    }

    /// Bound [`set_ex`](ValueOps::set_ex).
    pub async fn set_ex<V: ?Sized>(&self, value: &V, expiry: Duration) -> Result<(), Error>
    where
        VS: Serializer<V>,
    {
        self.ops.set_ex(self.key, value, expiry).await
    }

    /// Bound [`get`](ValueOps::get).
    pub async fn get<V>(&self) -> Result<Option<V>, Error>
    where
        VS: Deserializer<V>,
    {
        self.ops.get(self.key).await
    }

    /// Bound [`get_del`](ValueOps::get_del).
    pub async fn get_del<V>(&self) -> Result<Option<V>, Error>
    where
        VS: Deserializer<V>,
    {
        self.ops.get_del(self.key).await
    }

    /// Bound [`get_set`](ValueOps::get_set).
    pub async fn get_set<V: ?Sized, R>(&self, value: &V) -> Result<Option<R>, Error>
    where
        VS: Serializer<V> + Deserializer<R>,
    {
        self.ops.get_set(self.key, value).await
    }

    /// Bound [`append`](ValueOps::append).
    pub async fn append<V: ?Sized>(&self, value: &V) -> Result<usize, Error>
    where
        VS: Serializer<V>,
    {
        self.ops.append(self.key, value).await
    }

    /// Bound [`strlen`](ValueOps::strlen).
    pub async fn strlen(&self) -> Result<usize, Error> {
        self.ops.strlen(self.key).await
    }

    /// Bound [`getrange`](ValueOps::getrange).
    pub async fn getrange<V>(&self, start: isize, end: isize) -> Result<V, Error>
    where
        VS: Deserializer<V>,
    {
        self.ops.getrange(self.key, start, end).await
    }

    /// Bound [`setrange`](ValueOps::setrange).
    pub async fn setrange<V: ?Sized>(&self, offset: usize, value: &V) -> Result<usize, Error>
    where
        VS: Serializer<V>,
    {
        self.ops.setrange(self.key, offset, value).await
    }

    /// Bound [`incr`](ValueOps::incr).
    pub async fn incr(&self) -> Result<i64, Error> {
        self.ops.incr(self.key).await
    }

    /// Bound [`incrby`](ValueOps::incrby).
    pub async fn incrby(&self, increment: i64) -> Result<i64, Error> {
        self.ops.incrby(self.key, increment).await
    }

    /// Bound [`incrbyfloat`](ValueOps::incrbyfloat).
    pub async fn incrbyfloat(&self, increment: f64) -> Result<f64, Error> {
        self.ops.incrbyfloat(self.key, increment).await
    }

    /// Bound [`decr`](ValueOps::decr).
    pub async fn decr(&self) -> Result<i64, Error> {
        self.ops.decr(self.key).await
    }

    /// Bound [`decrby`](ValueOps::decrby).
    pub async fn decrby(&self, decrement: i64) -> Result<i64, Error> {
        self.ops.decrby(self.key, decrement).await
    }
}
