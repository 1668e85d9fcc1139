//! Operations on HyperLogLog cardinality sketches.

use crate::client::Error;
use crate::connector::Connector;
use crate::resp::Command;
use crate::serializer::Serializer;
use crate::template::Template;

/// View over the HyperLogLog commands.
///
/// Obtained from [`Template::hyperloglog_ops`](crate::Template::hyperloglog_ops).
#[derive(Debug)]
pub struct HyperLogLogOps<'a, KS, VS, C: Connector> {
    template: &'a Template<KS, VS, C>,
}

/// [`HyperLogLogOps`](HyperLogLogOps) narrowed to one fixed key.
#[derive(Debug)]
pub struct BoundHyperLogLogOps<'a, K: ?Sized, KS, VS, C: Connector> {
    ops: HyperLogLogOps<'a, KS, VS, C>,
    key: &'a K,
}

impl<'a, KS, VS, C: Connector> HyperLogLogOps<'a, KS, VS, C> {
    pub(crate) fn new(template: &'a Template<KS, VS, C>) -> Self {
        HyperLogLogOps { template }
    }

    /// <https://redis.io/commands/pfadd>
    ///
    /// Returns whether the sketch's estimate changed. An empty `values`
    /// slice merely creates the sketch.
    ///
    /// ```
    /// # helper::with_template(|template| async move {
    /// # let key = "doctest_hll_pfadd_1";
    /// # template.del(&[key]).await?;
    /// let ops = template.hyperloglog_ops();
    /// let res = ops.pfadd(key, &["a", "b", "c"]).await?;
    /// assert!(res);
    /// let res = ops.pfcount(&[key]).await?;
    /// assert_eq!(3, res);
    /// # Ok(())})?; Ok::<(), helper::BoxError>(())
    /// ```
    pub async fn pfadd<K: ?Sized, V>(&self, key: &K, values: &[V]) -> Result<bool, Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V>,
    {
        let mut cmd = Command::new("PFADD");
        cmd.arg(self.template.raw_key(key)?);
        for value in values {
            cmd.arg(self.template.raw_value(value)?);
        }
        self.template.execute(&cmd).await?.into_bool().map_err(Into::into)
    }

    /// <https://redis.io/commands/pfcount>
    ///
    /// With several keys, estimates the cardinality of their union.
    pub async fn pfcount<K>(&self, keys: &[K]) -> Result<u64, Error>
    where
        KS: Serializer<K>,
    {
        if keys.is_empty() {
            return Ok(0);
        }
        let mut cmd = Command::new("PFCOUNT");
        for key in keys {
            cmd.arg(self.template.raw_key(key)?);
        }
        Ok(self.template.execute(&cmd).await?.into_integer()? as u64)
    }

    /// <https://redis.io/commands/pfmerge>
    ///
    /// Folds the source sketches into `destination`, which is created if
    /// missing.
    pub async fn pfmerge<N: ?Sized, K>(&self, destination: &N, sources: &[K]) -> Result<(), Error>
    where
        KS: Serializer<N> + Serializer<K>,
    {
        let mut cmd = Command::new("PFMERGE");
        cmd.arg(self.template.raw_key(destination)?);
        for source in sources {
            cmd.arg(self.template.raw_key(source)?);
        }
        self.template.execute(&cmd).await?.into_ok().map_err(Into::into)
    }
}

impl<'a, K: ?Sized, KS, VS, C: Connector> BoundHyperLogLogOps<'a, K, KS, VS, C>
where
    KS: Serializer<K>,
{
    pub(crate) fn new(ops: HyperLogLogOps<'a, KS, VS, C>, key: &'a K) -> Self {
        BoundHyperLogLogOps { ops, key }
    }

    /// The key every call operates on.
    pub fn key(&self) -> &K {
        self.key
    }

    /// Bound [`pfadd`](HyperLogLogOps::pfadd).
    pub async fn pfadd<V>(&self, values: &[V]) -> Result<bool, Error>
    where
        VS: Serializer<V>,
    {
        self.ops.pfadd(self.key, values).await
    }

    /// Bound [`pfcount`](HyperLogLogOps::pfcount), for this sketch alone.
    pub async fn pfcount(&self) -> Result<u64, Error> {
        let mut cmd = Command::new("PFCOUNT");
        cmd.arg(self.ops.template.raw_key(self.key)?);
        Ok(self.ops.template.execute(&cmd).await?.into_integer()? as u64)
    }
}
