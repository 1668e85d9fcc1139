//! Blocking facade over the asynchronous template.
//!
//! Each call drives the corresponding async operation to completion on a
//! private current-thread runtime, so the two families have identical
//! semantics by construction. Use it from synchronous code only: calling
//! into this module from inside an async runtime panics.
//!
//! Enabled with the `blocking` cargo feature.

use std::time::{Duration, SystemTime};

use tokio::runtime::Runtime;

use crate::client::Error;
use crate::connection;
use crate::connector::{Connector, TcpConnector};
use crate::expiry::{Expiration, ExpiryCondition, FieldExpireOutcome, FieldPersistOutcome};
use crate::ops::{
    GeoFrom, GeoResult, GeoSearchArgs, GeoShape, GeoUnit, ListSide, PendingEntry, PendingSummary,
    Point, RangeBound, ReadOffset, SetOptions, StreamEntry, StreamId, StreamTrim,
};
use crate::resp::{Command, Value};
use crate::serializer::{Deserializer, Serializer, StringSerializer};
use crate::template::KeyType;

/// Blocking twin of [`Template`](crate::Template).
#[derive(Debug)]
pub struct Template<KS = StringSerializer, VS = StringSerializer, C: Connector = TcpConnector> {
    inner: crate::Template<KS, VS, C>,
    runtime: Runtime,
}

/// Blocking twin of [`ValueOps`](crate::ops::ValueOps).
#[derive(Debug)]
pub struct ValueOps<'a, KS, VS, C: Connector> {
    ops: crate::ops::ValueOps<'a, KS, VS, C>,
    runtime: &'a Runtime,
}

/// Blocking twin of [`ListOps`](crate::ops::ListOps).
#[derive(Debug)]
pub struct ListOps<'a, KS, VS, C: Connector> {
    ops: crate::ops::ListOps<'a, KS, VS, C>,
    runtime: &'a Runtime,
}

/// Blocking twin of [`SetOps`](crate::ops::SetOps).
#[derive(Debug)]
pub struct SetOps<'a, KS, VS, C: Connector> {
    ops: crate::ops::SetOps<'a, KS, VS, C>,
    runtime: &'a Runtime,
}

/// Blocking twin of [`ZSetOps`](crate::ops::ZSetOps).
#[derive(Debug)]
pub struct ZSetOps<'a, KS, VS, C: Connector> {
    ops: crate::ops::ZSetOps<'a, KS, VS, C>,
    runtime: &'a Runtime,
}

/// Blocking twin of [`HashOps`](crate::ops::HashOps).
#[derive(Debug)]
pub struct HashOps<'a, KS, VS, C: Connector> {
    ops: crate::ops::HashOps<'a, KS, VS, C>,
    runtime: &'a Runtime,
}

/// Blocking twin of [`GeoOps`](crate::ops::GeoOps).
#[derive(Debug)]
pub struct GeoOps<'a, KS, VS, C: Connector> {
    ops: crate::ops::GeoOps<'a, KS, VS, C>,
    runtime: &'a Runtime,
}

/// Blocking twin of [`StreamOps`](crate::ops::StreamOps).
#[derive(Debug)]
pub struct StreamOps<'a, KS, VS, C: Connector> {
    ops: crate::ops::StreamOps<'a, KS, VS, C>,
    runtime: &'a Runtime,
}

/// Blocking twin of [`HyperLogLogOps`](crate::ops::HyperLogLogOps).
#[derive(Debug)]
pub struct HyperLogLogOps<'a, KS, VS, C: Connector> {
    ops: crate::ops::HyperLogLogOps<'a, KS, VS, C>,
    runtime: &'a Runtime,
}

fn runtime() -> Result<Runtime, Error> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| connection::Error::Io(err).into())
}

impl Template {
    /// Connects with default configurations: UTF-8 keys and values over TCP.
    ///
    /// # Panic
    ///
    /// It panics if `connection_limit` is zero.
    pub fn new(connection_limit: usize, addr: &str) -> Result<Self, Error> {
        let runtime = runtime()?;
        let inner = runtime.block_on(crate::Template::new(connection_limit, addr))?;
        Ok(Template { inner, runtime })
    }
}

impl<KS, VS, C: Connector> Template<KS, VS, C> {
    /// Wraps an already-configured async template.
    pub fn from_async(inner: crate::Template<KS, VS, C>) -> Result<Self, Error> {
        Ok(Template {
            inner,
            runtime: runtime()?,
        })
    }

    /// Replaces both serializers, keeping the client and runtime.
    pub fn with_serializers<KS2, VS2>(self, keys: KS2, values: VS2) -> Template<KS2, VS2, C> {
        Template {
            inner: self.inner.with_serializers(keys, values),
            runtime: self.runtime,
        }
    }

    /// The wrapped async template.
    pub fn inner(&self) -> &crate::Template<KS, VS, C> {
        &self.inner
    }

    pub fn raw_command(&self, command: &Command) -> Result<Value, Error> {
        self.runtime.block_on(self.inner.raw_command(command))
    }

    pub fn value_ops(&self) -> ValueOps<'_, KS, VS, C> {
        ValueOps {
            ops: self.inner.value_ops(),
            runtime: &self.runtime,
        }
    }

    pub fn list_ops(&self) -> ListOps<'_, KS, VS, C> {
        ListOps {
            ops: self.inner.list_ops(),
            runtime: &self.runtime,
        }
    }

    pub fn set_ops(&self) -> SetOps<'_, KS, VS, C> {
        SetOps {
            ops: self.inner.set_ops(),
            runtime: &self.runtime,
        }
    }

    pub fn zset_ops(&self) -> ZSetOps<'_, KS, VS, C> {
        ZSetOps {
            ops: self.inner.zset_ops(),
            runtime: &self.runtime,
        }
    }

    pub fn hash_ops(&self) -> HashOps<'_, KS, VS, C> {
        HashOps {
            ops: self.inner.hash_ops(),
            runtime: &self.runtime,
        }
    }

    pub fn geo_ops(&self) -> GeoOps<'_, KS, VS, C> {
        GeoOps {
            ops: self.inner.geo_ops(),
            runtime: &self.runtime,
        }
    }

    pub fn stream_ops(&self) -> StreamOps<'_, KS, VS, C> {
        StreamOps {
            ops: self.inner.stream_ops(),
            runtime: &self.runtime,
        }
    }

    pub fn hyperloglog_ops(&self) -> HyperLogLogOps<'_, KS, VS, C> {
        HyperLogLogOps {
            ops: self.inner.hyperloglog_ops(),
            runtime: &self.runtime,
        }
    }

    // key-level commands

    pub fn del<K>(&self, keys: &[K]) -> Result<usize, Error>
    where
        KS: Serializer<K>,
    {
        self.runtime.block_on(self.inner.del(keys))
    }

    pub fn unlink<K>(&self, keys: &[K]) -> Result<usize, Error>
    where
        KS: Serializer<K>,
    {
        self.runtime.block_on(self.inner.unlink(keys))
    }

    pub fn exists<K>(&self, keys: &[K]) -> Result<usize, Error>
    where
        KS: Serializer<K>,
    {
        self.runtime.block_on(self.inner.exists(keys))
    }

    pub fn exists_one<K: ?Sized>(&self, key: &K) -> Result<bool, Error>
    where
        KS: Serializer<K>,
    {
        self.runtime.block_on(self.inner.exists_one(key))
    }

    pub fn expire<K: ?Sized>(&self, key: &K, timeout: Duration) -> Result<bool, Error>
    where
        KS: Serializer<K>,
    {
        self.runtime.block_on(self.inner.expire(key, timeout))
    }

    pub fn expire_at<K: ?Sized>(&self, key: &K, deadline: SystemTime) -> Result<bool, Error>
    where
        KS: Serializer<K>,
    {
        self.runtime.block_on(self.inner.expire_at(key, deadline))
    }

    pub fn persist<K: ?Sized>(&self, key: &K) -> Result<bool, Error>
    where
        KS: Serializer<K>,
    {
        self.runtime.block_on(self.inner.persist(key))
    }

    pub fn ttl<K: ?Sized>(&self, key: &K) -> Result<Expiration, Error>
    where
        KS: Serializer<K>,
    {
        self.runtime.block_on(self.inner.ttl(key))
    }

    pub fn key_type<K: ?Sized>(&self, key: &K) -> Result<KeyType, Error>
    where
        KS: Serializer<K>,
    {
        self.runtime.block_on(self.inner.key_type(key))
    }

    pub fn rename<K: ?Sized, N: ?Sized>(&self, key: &K, new_key: &N) -> Result<(), Error>
    where
        KS: Serializer<K> + Serializer<N>,
    {
        self.runtime.block_on(self.inner.rename(key, new_key))
    }

    pub fn rename_nx<K: ?Sized, N: ?Sized>(&self, key: &K, new_key: &N) -> Result<bool, Error>
    where
        KS: Serializer<K> + Serializer<N>,
    {
        self.runtime.block_on(self.inner.rename_nx(key, new_key))
    }

    pub fn copy<K: ?Sized, N: ?Sized>(
        &self,
        source: &K,
        destination: &N,
        db: Option<u32>,
        replace: bool,
    ) -> Result<bool, Error>
    where
        KS: Serializer<K> + Serializer<N>,
    {
        self.runtime
            .block_on(self.inner.copy(source, destination, db, replace))
    }

    pub fn touch<K>(&self, keys: &[K]) -> Result<usize, Error>
    where
        KS: Serializer<K>,
    {
        self.runtime.block_on(self.inner.touch(keys))
    }

    pub fn scan<K>(
        &self,
        cursor: u64,
        match_pattern: Option<&str>,
        count: Option<usize>,
    ) -> Result<(u64, Vec<K>), Error>
    where
        KS: Deserializer<K>,
    {
        self.runtime
            .block_on(self.inner.scan(cursor, match_pattern, count))
    }
}

impl<'a, KS, VS, C: Connector> ValueOps<'a, KS, VS, C> {
    pub fn set<K: ?Sized, V: ?Sized>(&self, key: &K, value: &V) -> Result<(), Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V>,
    {
        self.runtime.block_on(self.ops.set(key, value))
    }

    pub fn set_with<K: ?Sized, V: ?Sized>(
        &self,
        key: &K,
        value: &V,
        options: SetOptions,
    ) -> Result<bool, Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V>,
    {
        self.runtime.block_on(self.ops.set_with(key, value, options))
    }

    pub fn set_nx<K: ?Sized, V: ?Sized>(&self, key: &K, value: &V) -> Result<bool, Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V>,
    {
        self.runtime.block_on(self.ops.set_nx(key, value))
    }

    pub fn set_ex<K: ?Sized, V: ?Sized>(
        &self,
        key: &K,
        value: &V,
        expiry: Duration,
    ) -> Result<(), Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V>,
    {
        self.runtime.block_on(self.ops.set_ex(key, value, expiry))
    }

    pub fn get<K: ?Sized, V>(&self, key: &K) -> Result<Option<V>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        self.runtime.block_on(self.ops.get(key))
    }

    pub fn get_del<K: ?Sized, V>(&self, key: &K) -> Result<Option<V>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        self.runtime.block_on(self.ops.get_del(key))
    }

    pub fn get_set<K: ?Sized, V: ?Sized, R>(&self, key: &K, value: &V) -> Result<Option<R>, Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V> + Deserializer<R>,
    {
        self.runtime.block_on(self.ops.get_set(key, value))
    }

    pub fn append<K: ?Sized, V: ?Sized>(&self, key: &K, value: &V) -> Result<usize, Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V>,
    {
        self.runtime.block_on(self.ops.append(key, value))
    }

    pub fn strlen<K: ?Sized>(&self, key: &K) -> Result<usize, Error>
    where
        KS: Serializer<K>,
    {
        self.runtime.block_on(self.ops.strlen(key))
    }

    pub fn getrange<K: ?Sized, V>(&self, key: &K, start: isize, end: isize) -> Result<V, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        self.runtime.block_on(self.ops.getrange(key, start, end))
    }

    pub fn setrange<K: ?Sized, V: ?Sized>(
        &self,
        key: &K,
        offset: usize,
        value: &V,
    ) -> Result<usize, Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V>,
    {
        self.runtime.block_on(self.ops.setrange(key, offset, value))
    }

    pub fn incr<K: ?Sized>(&self, key: &K) -> Result<i64, Error>
    where
        KS: Serializer<K>,
    {
        self.runtime.block_on(self.ops.incr(key))
    }

    pub fn incrby<K: ?Sized>(&self, key: &K, increment: i64) -> Result<i64, Error>
    where
        KS: Serializer<K>,
    {
        self.runtime.block_on(self.ops.incrby(key, increment))
    }

    pub fn incrbyfloat<K: ?Sized>(&self, key: &K, increment: f64) -> Result<f64, Error>
    where
        KS: Serializer<K>,
    {
        self.runtime.block_on(self.ops.incrbyfloat(key, increment))
    }

    pub fn decr<K: ?Sized>(&self, key: &K) -> Result<i64, Error>
    where
        KS: Serializer<K>,
    {
        self.runtime.block_on(self.ops.decr(key))
    }

    pub fn decrby<K: ?Sized>(&self, key: &K, decrement: i64) -> Result<i64, Error>
    where
        KS: Serializer<K>,
    {
        self.runtime.block_on(self.ops.decrby(key, decrement))
    }

    pub fn mget<K, V>(&self, keys: &[K]) -> Result<Vec<Option<V>>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        self.runtime.block_on(self.ops.mget(keys))
    }

    pub fn mset<K, V>(&self, entries: &[(K, V)]) -> Result<(), Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V>,
    {
        self.runtime.block_on(self.ops.mset(entries))
    }

    pub fn msetnx<K, V>(&self, entries: &[(K, V)]) -> Result<bool, Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V>,
    {
        self.runtime.block_on(self.ops.msetnx(entries))
    }
}

impl<'a, KS, VS, C: Connector> ListOps<'a, KS, VS, C> {
    pub fn lpush<K: ?Sized, V>(&self, key: &K, values: &[V]) -> Result<usize, Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V>,
    {
        self.runtime.block_on(self.ops.lpush(key, values))
    }

    pub fn rpush<K: ?Sized, V>(&self, key: &K, values: &[V]) -> Result<usize, Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V>,
    {
        self.runtime.block_on(self.ops.rpush(key, values))
    }

    pub fn lpushx<K: ?Sized, V>(&self, key: &K, values: &[V]) -> Result<usize, Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V>,
    {
        self.runtime.block_on(self.ops.lpushx(key, values))
    }

    pub fn rpushx<K: ?Sized, V>(&self, key: &K, values: &[V]) -> Result<usize, Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V>,
    {
        self.runtime.block_on(self.ops.rpushx(key, values))
    }

    pub fn lpop<K: ?Sized, V>(&self, key: &K) -> Result<Option<V>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        self.runtime.block_on(self.ops.lpop(key))
    }

    pub fn rpop<K: ?Sized, V>(&self, key: &K) -> Result<Option<V>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        self.runtime.block_on(self.ops.rpop(key))
    }

    pub fn lpop_count<K: ?Sized, V>(&self, key: &K, count: usize) -> Result<Vec<V>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        self.runtime.block_on(self.ops.lpop_count(key, count))
    }

    pub fn rpop_count<K: ?Sized, V>(&self, key: &K, count: usize) -> Result<Vec<V>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        self.runtime.block_on(self.ops.rpop_count(key, count))
    }

    pub fn blpop<K: ?Sized, V>(&self, key: &K, timeout: Duration) -> Result<Option<V>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        self.runtime.block_on(self.ops.blpop(key, timeout))
    }

    pub fn brpop<K: ?Sized, V>(&self, key: &K, timeout: Duration) -> Result<Option<V>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        self.runtime.block_on(self.ops.brpop(key, timeout))
    }

    pub fn lrange<K: ?Sized, V>(&self, key: &K, start: isize, stop: isize) -> Result<Vec<V>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        self.runtime.block_on(self.ops.lrange(key, start, stop))
    }

    pub fn llen<K: ?Sized>(&self, key: &K) -> Result<usize, Error>
    where
        KS: Serializer<K>,
    {
        self.runtime.block_on(self.ops.llen(key))
    }

    pub fn lindex<K: ?Sized, V>(&self, key: &K, index: isize) -> Result<Option<V>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        self.runtime.block_on(self.ops.lindex(key, index))
    }

    pub fn lset<K: ?Sized, V: ?Sized>(&self, key: &K, index: isize, value: &V) -> Result<(), Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V>,
    {
        self.runtime.block_on(self.ops.lset(key, index, value))
    }

    pub fn ltrim<K: ?Sized>(&self, key: &K, start: isize, stop: isize) -> Result<(), Error>
    where
        KS: Serializer<K>,
    {
        self.runtime.block_on(self.ops.ltrim(key, start, stop))
    }

    pub fn lrem<K: ?Sized, V: ?Sized>(
        &self,
        key: &K,
        count: isize,
        value: &V,
    ) -> Result<usize, Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V>,
    {
        self.runtime.block_on(self.ops.lrem(key, count, value))
    }

    pub fn linsert_before<K: ?Sized, P: ?Sized, V: ?Sized>(
        &self,
        key: &K,
        pivot: &P,
        value: &V,
    ) -> Result<i64, Error>
    where
        KS: Serializer<K>,
        VS: Serializer<P> + Serializer<V>,
    {
        self.runtime
            .block_on(self.ops.linsert_before(key, pivot, value))
    }

    pub fn linsert_after<K: ?Sized, P: ?Sized, V: ?Sized>(
        &self,
        key: &K,
        pivot: &P,
        value: &V,
    ) -> Result<i64, Error>
    where
        KS: Serializer<K>,
        VS: Serializer<P> + Serializer<V>,
    {
        self.runtime
            .block_on(self.ops.linsert_after(key, pivot, value))
    }

    pub fn lmove<K: ?Sized, N: ?Sized, V>(
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
        self.runtime
            .block_on(self.ops.lmove(source, destination, from, to))
    }
}

impl<'a, KS, VS, C: Connector> SetOps<'a, KS, VS, C> {
    pub fn sadd<K: ?Sized, V>(&self, key: &K, members: &[V]) -> Result<usize, Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V>,
    {
        self.runtime.block_on(self.ops.sadd(key, members))
    }

    pub fn srem<K: ?Sized, V>(&self, key: &K, members: &[V]) -> Result<usize, Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V>,
    {
        self.runtime.block_on(self.ops.srem(key, members))
    }

    pub fn spop<K: ?Sized, V>(&self, key: &K) -> Result<Option<V>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        self.runtime.block_on(self.ops.spop(key))
    }

    pub fn spop_count<K: ?Sized, V>(&self, key: &K, count: usize) -> Result<Vec<V>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        self.runtime.block_on(self.ops.spop_count(key, count))
    }

    pub fn smembers<K: ?Sized, V>(&self, key: &K) -> Result<Vec<V>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        self.runtime.block_on(self.ops.smembers(key))
    }

    pub fn sismember<K: ?Sized, V: ?Sized>(&self, key: &K, member: &V) -> Result<bool, Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V>,
    {
        self.runtime.block_on(self.ops.sismember(key, member))
    }

    pub fn smismember<K: ?Sized, V>(&self, key: &K, members: &[V]) -> Result<Vec<bool>, Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V>,
    {
        self.runtime.block_on(self.ops.smismember(key, members))
    }

    pub fn scard<K: ?Sized>(&self, key: &K) -> Result<usize, Error>
    where
        KS: Serializer<K>,
    {
        self.runtime.block_on(self.ops.scard(key))
    }

    pub fn srandmember<K: ?Sized, V>(&self, key: &K) -> Result<Option<V>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        self.runtime.block_on(self.ops.srandmember(key))
    }

    pub fn srandmember_count<K: ?Sized, V>(&self, key: &K, count: isize) -> Result<Vec<V>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        self.runtime.block_on(self.ops.srandmember_count(key, count))
    }

    pub fn smove<K: ?Sized, N: ?Sized, V: ?Sized>(
        &self,
        source: &K,
        destination: &N,
        member: &V,
    ) -> Result<bool, Error>
    where
        KS: Serializer<K> + Serializer<N>,
        VS: Serializer<V>,
    {
        self.runtime
            .block_on(self.ops.smove(source, destination, member))
    }

    pub fn sinter<K, V>(&self, keys: &[K]) -> Result<Vec<V>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        self.runtime.block_on(self.ops.sinter(keys))
    }

    pub fn sunion<K, V>(&self, keys: &[K]) -> Result<Vec<V>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        self.runtime.block_on(self.ops.sunion(keys))
    }

    pub fn sdiff<K, V>(&self, keys: &[K]) -> Result<Vec<V>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        self.runtime.block_on(self.ops.sdiff(keys))
    }

    pub fn sinterstore<N: ?Sized, K>(&self, destination: &N, keys: &[K]) -> Result<usize, Error>
    where
        KS: Serializer<N> + Serializer<K>,
    {
        self.runtime.block_on(self.ops.sinterstore(destination, keys))
    }

    pub fn sunionstore<N: ?Sized, K>(&self, destination: &N, keys: &[K]) -> Result<usize, Error>
    where
        KS: Serializer<N> + Serializer<K>,
    {
        self.runtime.block_on(self.ops.sunionstore(destination, keys))
    }

    pub fn sdiffstore<N: ?Sized, K>(&self, destination: &N, keys: &[K]) -> Result<usize, Error>
    where
        KS: Serializer<N> + Serializer<K>,
    {
        self.runtime.block_on(self.ops.sdiffstore(destination, keys))
    }

    pub fn sscan<K: ?Sized, V>(
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
        self.runtime
            .block_on(self.ops.sscan(key, cursor, match_pattern, count))
    }
}

impl<'a, KS, VS, C: Connector> ZSetOps<'a, KS, VS, C> {
    pub fn zadd<K: ?Sized, V: ?Sized>(&self, key: &K, score: f64, member: &V) -> Result<bool, Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V>,
    {
        self.runtime.block_on(self.ops.zadd(key, score, member))
    }

    pub fn zadd_multi<K: ?Sized, V>(&self, key: &K, entries: &[(V, f64)]) -> Result<usize, Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V>,
    {
        self.runtime.block_on(self.ops.zadd_multi(key, entries))
    }

    pub fn zincrby<K: ?Sized, V: ?Sized>(
        &self,
        key: &K,
        delta: f64,
        member: &V,
    ) -> Result<f64, Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V>,
    {
        self.runtime.block_on(self.ops.zincrby(key, delta, member))
    }

    pub fn zrem<K: ?Sized, V>(&self, key: &K, members: &[V]) -> Result<usize, Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V>,
    {
        self.runtime.block_on(self.ops.zrem(key, members))
    }

    pub fn zscore<K: ?Sized, V: ?Sized>(&self, key: &K, member: &V) -> Result<Option<f64>, Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V>,
    {
        self.runtime.block_on(self.ops.zscore(key, member))
    }

    pub fn zmscore<K: ?Sized, V>(&self, key: &K, members: &[V]) -> Result<Vec<Option<f64>>, Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V>,
    {
        self.runtime.block_on(self.ops.zmscore(key, members))
    }

    pub fn zrank<K: ?Sized, V: ?Sized>(&self, key: &K, member: &V) -> Result<Option<u64>, Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V>,
    {
        self.runtime.block_on(self.ops.zrank(key, member))
    }

    pub fn zrevrank<K: ?Sized, V: ?Sized>(&self, key: &K, member: &V) -> Result<Option<u64>, Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V>,
    {
        self.runtime.block_on(self.ops.zrevrank(key, member))
    }

    pub fn zcard<K: ?Sized>(&self, key: &K) -> Result<usize, Error>
    where
        KS: Serializer<K>,
    {
        self.runtime.block_on(self.ops.zcard(key))
    }

    pub fn zcount<K: ?Sized>(&self, key: &K, min: f64, max: f64) -> Result<usize, Error>
    where
        KS: Serializer<K>,
    {
        self.runtime.block_on(self.ops.zcount(key, min, max))
    }

    pub fn zrange<K: ?Sized, V>(&self, key: &K, start: isize, stop: isize) -> Result<Vec<V>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        self.runtime.block_on(self.ops.zrange(key, start, stop))
    }

    pub fn zrevrange<K: ?Sized, V>(&self, key: &K, start: isize, stop: isize) -> Result<Vec<V>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        self.runtime.block_on(self.ops.zrevrange(key, start, stop))
    }

    pub fn zrange_with_scores<K: ?Sized, V>(
        &self,
        key: &K,
        start: isize,
        stop: isize,
    ) -> Result<Vec<(V, f64)>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        self.runtime
            .block_on(self.ops.zrange_with_scores(key, start, stop))
    }

    pub fn zrevrange_with_scores<K: ?Sized, V>(
        &self,
        key: &K,
        start: isize,
        stop: isize,
    ) -> Result<Vec<(V, f64)>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        self.runtime
            .block_on(self.ops.zrevrange_with_scores(key, start, stop))
    }

    pub fn zrangebyscore<K: ?Sized, V>(
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
        self.runtime
            .block_on(self.ops.zrangebyscore(key, min, max, limit))
    }

    pub fn zrevrangebyscore<K: ?Sized, V>(
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
        self.runtime
            .block_on(self.ops.zrevrangebyscore(key, max, min, limit))
    }

    pub fn zremrangebyrank<K: ?Sized>(
        &self,
        key: &K,
        start: isize,
        stop: isize,
    ) -> Result<usize, Error>
    where
        KS: Serializer<K>,
    {
        self.runtime
            .block_on(self.ops.zremrangebyrank(key, start, stop))
    }

    pub fn zremrangebyscore<K: ?Sized>(&self, key: &K, min: f64, max: f64) -> Result<usize, Error>
    where
        KS: Serializer<K>,
    {
        self.runtime
            .block_on(self.ops.zremrangebyscore(key, min, max))
    }

    pub fn zpopmin<K: ?Sized, V>(&self, key: &K) -> Result<Option<(V, f64)>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        self.runtime.block_on(self.ops.zpopmin(key))
    }

    pub fn zpopmax<K: ?Sized, V>(&self, key: &K) -> Result<Option<(V, f64)>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        self.runtime.block_on(self.ops.zpopmax(key))
    }

    pub fn zpopmin_count<K: ?Sized, V>(&self, key: &K, count: usize) -> Result<Vec<(V, f64)>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        self.runtime.block_on(self.ops.zpopmin_count(key, count))
    }

    pub fn zpopmax_count<K: ?Sized, V>(&self, key: &K, count: usize) -> Result<Vec<(V, f64)>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        self.runtime.block_on(self.ops.zpopmax_count(key, count))
    }

    pub fn zrandmember<K: ?Sized, V>(&self, key: &K) -> Result<Option<V>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        self.runtime.block_on(self.ops.zrandmember(key))
    }

    pub fn zunionstore<N: ?Sized, K>(&self, destination: &N, keys: &[K]) -> Result<usize, Error>
    where
        KS: Serializer<N> + Serializer<K>,
    {
        self.runtime.block_on(self.ops.zunionstore(destination, keys))
    }

    pub fn zinterstore<N: ?Sized, K>(&self, destination: &N, keys: &[K]) -> Result<usize, Error>
    where
        KS: Serializer<N> + Serializer<K>,
    {
        self.runtime.block_on(self.ops.zinterstore(destination, keys))
    }

    pub fn zdiffstore<N: ?Sized, K>(&self, destination: &N, keys: &[K]) -> Result<usize, Error>
    where
        KS: Serializer<N> + Serializer<K>,
    {
        self.runtime.block_on(self.ops.zdiffstore(destination, keys))
    }

    pub fn zscan<K: ?Sized, V>(
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
        self.runtime
            .block_on(self.ops.zscan(key, cursor, match_pattern, count))
    }
}

impl<'a, KS, VS, C: Connector> HashOps<'a, KS, VS, C> {
    pub fn hset<K: ?Sized, F: ?Sized, V: ?Sized>(
        &self,
        key: &K,
        field: &F,
        value: &V,
    ) -> Result<bool, Error>
    where
        KS: Serializer<K> + Serializer<F>,
        VS: Serializer<V>,
    {
        self.runtime.block_on(self.ops.hset(key, field, value))
    }

    pub fn hset_multi<K: ?Sized, F, V>(&self, key: &K, entries: &[(F, V)]) -> Result<usize, Error>
    where
        KS: Serializer<K> + Serializer<F>,
        VS: Serializer<V>,
    {
        self.runtime.block_on(self.ops.hset_multi(key, entries))
    }

    pub fn hsetnx<K: ?Sized, F: ?Sized, V: ?Sized>(
        &self,
        key: &K,
        field: &F,
        value: &V,
    ) -> Result<bool, Error>
    where
        KS: Serializer<K> + Serializer<F>,
        VS: Serializer<V>,
    {
        self.runtime.block_on(self.ops.hsetnx(key, field, value))
    }

    pub fn hget<K: ?Sized, F: ?Sized, V>(&self, key: &K, field: &F) -> Result<Option<V>, Error>
    where
        KS: Serializer<K> + Serializer<F>,
        VS: Deserializer<V>,
    {
        self.runtime.block_on(self.ops.hget(key, field))
    }

    pub fn hmget<K: ?Sized, F, V>(&self, key: &K, fields: &[F]) -> Result<Vec<Option<V>>, Error>
    where
        KS: Serializer<K> + Serializer<F>,
        VS: Deserializer<V>,
    {
        self.runtime.block_on(self.ops.hmget(key, fields))
    }

    pub fn hgetall<K: ?Sized, F, V>(&self, key: &K) -> Result<Vec<(F, V)>, Error>
    where
        KS: Serializer<K> + Deserializer<F>,
        VS: Deserializer<V>,
    {
        self.runtime.block_on(self.ops.hgetall(key))
    }

    pub fn hkeys<K: ?Sized, F>(&self, key: &K) -> Result<Vec<F>, Error>
    where
        KS: Serializer<K> + Deserializer<F>,
    {
        self.runtime.block_on(self.ops.hkeys(key))
    }

    pub fn hvals<K: ?Sized, V>(&self, key: &K) -> Result<Vec<V>, Error>
    where
        KS: Serializer<K>,
        VS: Deserializer<V>,
    {
        self.runtime.block_on(self.ops.hvals(key))
    }

    pub fn hdel<K: ?Sized, F>(&self, key: &K, fields: &[F]) -> Result<usize, Error>
    where
        KS: Serializer<K> + Serializer<F>,
    {
        self.runtime.block_on(self.ops.hdel(key, fields))
    }

    pub fn hexists<K: ?Sized, F: ?Sized>(&self, key: &K, field: &F) -> Result<bool, Error>
    where
        KS: Serializer<K> + Serializer<F>,
    {
        self.runtime.block_on(self.ops.hexists(key, field))
    }

    pub fn hlen<K: ?Sized>(&self, key: &K) -> Result<usize, Error>
    where
        KS: Serializer<K>,
    {
        self.runtime.block_on(self.ops.hlen(key))
    }

    pub fn hstrlen<K: ?Sized, F: ?Sized>(&self, key: &K, field: &F) -> Result<usize, Error>
    where
        KS: Serializer<K> + Serializer<F>,
    {
        self.runtime.block_on(self.ops.hstrlen(key, field))
    }

    pub fn hincrby<K: ?Sized, F: ?Sized>(
        &self,
        key: &K,
        field: &F,
        increment: i64,
    ) -> Result<i64, Error>
    where
        KS: Serializer<K> + Serializer<F>,
    {
        self.runtime.block_on(self.ops.hincrby(key, field, increment))
    }

    pub fn hincrbyfloat<K: ?Sized, F: ?Sized>(
        &self,
        key: &K,
        field: &F,
        increment: f64,
    ) -> Result<f64, Error>
    where
        KS: Serializer<K> + Serializer<F>,
    {
        self.runtime
            .block_on(self.ops.hincrbyfloat(key, field, increment))
    }

    pub fn hrandfield<K: ?Sized, F>(&self, key: &K) -> Result<Option<F>, Error>
    where
        KS: Serializer<K> + Deserializer<F>,
    {
        self.runtime.block_on(self.ops.hrandfield(key))
    }

    pub fn hrandfield_count<K: ?Sized, F>(&self, key: &K, count: isize) -> Result<Vec<F>, Error>
    where
        KS: Serializer<K> + Deserializer<F>,
    {
        self.runtime.block_on(self.ops.hrandfield_count(key, count))
    }

    pub fn hscan<K: ?Sized, F, V>(
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
        self.runtime
            .block_on(self.ops.hscan(key, cursor, match_pattern, count))
    }

    pub fn hexpire<K: ?Sized, F>(
        &self,
        key: &K,
        timeout: Duration,
        condition: Option<ExpiryCondition>,
        fields: &[F],
    ) -> Result<Vec<FieldExpireOutcome>, Error>
    where
        KS: Serializer<K> + Serializer<F>,
    {
        self.runtime
            .block_on(self.ops.hexpire(key, timeout, condition, fields))
    }

    pub fn hexpire_at<K: ?Sized, F>(
        &self,
        key: &K,
        deadline: SystemTime,
        condition: Option<ExpiryCondition>,
        fields: &[F],
    ) -> Result<Vec<FieldExpireOutcome>, Error>
    where
        KS: Serializer<K> + Serializer<F>,
    {
        self.runtime
            .block_on(self.ops.hexpire_at(key, deadline, condition, fields))
    }

    pub fn hpersist<K: ?Sized, F>(
        &self,
        key: &K,
        fields: &[F],
    ) -> Result<Vec<FieldPersistOutcome>, Error>
    where
        KS: Serializer<K> + Serializer<F>,
    {
        self.runtime.block_on(self.ops.hpersist(key, fields))
    }

    pub fn httl<K: ?Sized, F>(&self, key: &K, fields: &[F]) -> Result<Vec<Expiration>, Error>
    where
        KS: Serializer<K> + Serializer<F>,
    {
        self.runtime.block_on(self.ops.httl(key, fields))
    }
}

impl<'a, KS, VS, C: Connector> GeoOps<'a, KS, VS, C> {
    pub fn geoadd<K: ?Sized, V>(&self, key: &K, entries: &[(Point, V)]) -> Result<usize, Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V>,
    {
        self.runtime.block_on(self.ops.geoadd(key, entries))
    }

    pub fn geopos<K: ?Sized, V>(&self, key: &K, members: &[V]) -> Result<Vec<Option<Point>>, Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V>,
    {
        self.runtime.block_on(self.ops.geopos(key, members))
    }

    pub fn geodist<K: ?Sized, A: ?Sized, B: ?Sized>(
        &self,
        key: &K,
        from: &A,
        to: &B,
        unit: GeoUnit,
    ) -> Result<Option<f64>, Error>
    where
        KS: Serializer<K>,
        VS: Serializer<A> + Serializer<B>,
    {
        self.runtime.block_on(self.ops.geodist(key, from, to, unit))
    }

    pub fn geohash<K: ?Sized, V>(&self, key: &K, members: &[V]) -> Result<Vec<Option<String>>, Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V>,
    {
        self.runtime.block_on(self.ops.geohash(key, members))
    }

    pub fn georemove<K: ?Sized, V>(&self, key: &K, members: &[V]) -> Result<usize, Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V>,
    {
        self.runtime.block_on(self.ops.georemove(key, members))
    }

    pub fn geosearch<K: ?Sized, Q: ?Sized, V>(
        &self,
        key: &K,
        from: GeoFrom<'_, Q>,
        shape: GeoShape,
        args: GeoSearchArgs,
    ) -> Result<Vec<GeoResult<V>>, Error>
    where
        KS: Serializer<K>,
        VS: Serializer<Q> + Deserializer<V>,
    {
        self.runtime
            .block_on(self.ops.geosearch(key, from, shape, args))
    }
}

impl<'a, KS, VS, C: Connector> StreamOps<'a, KS, VS, C> {
    pub fn xadd<K: ?Sized, F, V>(&self, key: &K, fields: &[(F, V)]) -> Result<StreamId, Error>
    where
        KS: Serializer<K> + Serializer<F>,
        VS: Serializer<V>,
    {
        self.runtime.block_on(self.ops.xadd(key, fields))
    }

    pub fn xadd_with<K: ?Sized, F, V>(
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
        self.runtime.block_on(self.ops.xadd_with(key, id, trim, fields))
    }

    pub fn xlen<K: ?Sized>(&self, key: &K) -> Result<usize, Error>
    where
        KS: Serializer<K>,
    {
        self.runtime.block_on(self.ops.xlen(key))
    }

    pub fn xrange<K: ?Sized, F, V>(
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
        self.runtime.block_on(self.ops.xrange(key, start, end, count))
    }

    pub fn xrevrange<K: ?Sized, F, V>(
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
        self.runtime
            .block_on(self.ops.xrevrange(key, end, start, count))
    }

    pub fn xread<K: ?Sized, R, F, V>(
        &self,
        streams: &[(&K, ReadOffset)],
        count: Option<usize>,
        block: Option<Duration>,
    ) -> Result<Vec<(R, Vec<StreamEntry<F, V>>)>, Error>
    where
        KS: Serializer<K> + Deserializer<R> + Deserializer<F>,
        VS: Deserializer<V>,
    {
        self.runtime.block_on(self.ops.xread(streams, count, block))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn xread_group<K: ?Sized, R, F, V>(
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
        self.runtime.block_on(
            self.ops
                .xread_group(group, consumer, streams, count, block, noack),
        )
    }

    pub fn xdel<K: ?Sized>(&self, key: &K, ids: &[StreamId]) -> Result<usize, Error>
    where
        KS: Serializer<K>,
    {
        self.runtime.block_on(self.ops.xdel(key, ids))
    }

    pub fn xtrim<K: ?Sized>(&self, key: &K, trim: StreamTrim) -> Result<usize, Error>
    where
        KS: Serializer<K>,
    {
        self.runtime.block_on(self.ops.xtrim(key, trim))
    }

    pub fn xgroup_create<K: ?Sized>(
        &self,
        key: &K,
        group: &str,
        offset: ReadOffset,
        mkstream: bool,
    ) -> Result<(), Error>
    where
        KS: Serializer<K>,
    {
        self.runtime
            .block_on(self.ops.xgroup_create(key, group, offset, mkstream))
    }

    pub fn xgroup_destroy<K: ?Sized>(&self, key: &K, group: &str) -> Result<bool, Error>
    where
        KS: Serializer<K>,
    {
        self.runtime.block_on(self.ops.xgroup_destroy(key, group))
    }

    pub fn xgroup_delconsumer<K: ?Sized>(
        &self,
        key: &K,
        group: &str,
        consumer: &str,
    ) -> Result<u64, Error>
    where
        KS: Serializer<K>,
    {
        self.runtime
            .block_on(self.ops.xgroup_delconsumer(key, group, consumer))
    }

    pub fn xack<K: ?Sized>(&self, key: &K, group: &str, ids: &[StreamId]) -> Result<usize, Error>
    where
        KS: Serializer<K>,
    {
        self.runtime.block_on(self.ops.xack(key, group, ids))
    }

    pub fn xpending_summary<K: ?Sized>(&self, key: &K, group: &str) -> Result<PendingSummary, Error>
    where
        KS: Serializer<K>,
    {
        self.runtime.block_on(self.ops.xpending_summary(key, group))
    }

    pub fn xpending<K: ?Sized>(
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
        self.runtime
            .block_on(self.ops.xpending(key, group, start, end, count, consumer))
    }

    pub fn xclaim<K: ?Sized, F, V>(
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
        self.runtime
            .block_on(self.ops.xclaim(key, group, consumer, min_idle, ids))
    }
}

impl<'a, KS, VS, C: Connector> HyperLogLogOps<'a, KS, VS, C> {
    pub fn pfadd<K: ?Sized, V>(&self, key: &K, values: &[V]) -> Result<bool, Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V>,
    {
        self.runtime.block_on(self.ops.pfadd(key, values))
    }

    pub fn pfcount<K>(&self, keys: &[K]) -> Result<u64, Error>
    where
        KS: Serializer<K>,
    {
        self.runtime.block_on(self.ops.pfcount(keys))
    }

    pub fn pfmerge<N: ?Sized, K>(&self, destination: &N, sources: &[K]) -> Result<(), Error>
    where
        KS: Serializer<N> + Serializer<K>,
    {
        self.runtime.block_on(self.ops.pfmerge(destination, sources))
    }
}
