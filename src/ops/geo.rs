//! Operations on geospatial indexes.
//!
//! Geo indexes are sorted sets under the hood; members go through the value
//! serializer like sorted set members do.

use crate::client::{Error, ErrorKind};
use crate::connector::Connector;
use crate::resp::{Command, TypeError, Value};
use crate::serializer::{Deserializer, Serializer};
use crate::template::Template;

/// View over the geo commands.
///
/// Obtained from [`Template::geo_ops`](crate::Template::geo_ops).
#[derive(Debug)]
pub struct GeoOps<'a, KS, VS, C: Connector> {
    template: &'a Template<KS, VS, C>,
}

/// [`GeoOps`](GeoOps) narrowed to one fixed key.
#[derive(Debug)]
pub struct BoundGeoOps<'a, K: ?Sized, KS, VS, C: Connector> {
    ops: GeoOps<'a, KS, VS, C>,
    key: &'a K,
}

/// A WGS84 coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub longitude: f64,
    pub latitude: f64,
}

/// Distance unit accepted and reported by the geo commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoUnit {
    Meters,
    Kilometers,
    Miles,
    Feet,
}

/// Center of a [`geosearch`](GeoOps::geosearch).
#[derive(Debug, Clone, Copy)]
pub enum GeoFrom<'a, V: ?Sized> {
    /// Use the position of an existing member (`FROMMEMBER`).
    Member(&'a V),
    /// Use an explicit coordinate (`FROMLONLAT`).
    Position(Point),
}

/// Area searched by a [`geosearch`](GeoOps::geosearch).
#[derive(Debug, Clone, Copy)]
pub enum GeoShape {
    /// Circle with the given radius (`BYRADIUS`).
    Radius(f64, GeoUnit),
    /// Axis-aligned box of the given width and height (`BYBOX`).
    Rectangle(f64, f64, GeoUnit),
}

/// Result ordering for a [`geosearch`](GeoOps::geosearch).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Optional modifiers for a [`geosearch`](GeoOps::geosearch).
#[derive(Debug, Clone, Copy, Default)]
pub struct GeoSearchArgs {
    count: Option<usize>,
    any: bool,
    order: Option<SortOrder>,
    with_coord: bool,
    with_dist: bool,
}

/// One match of a [`geosearch`](GeoOps::geosearch).
///
/// `distance` and `point` are only populated when the search asked for them.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoResult<V> {
    pub member: V,
    pub distance: Option<f64>,
    pub point: Option<Point>,
}

impl GeoUnit {
    fn keyword(self) -> &'static str {
        match self {
            GeoUnit::Meters => "m",
            GeoUnit::Kilometers => "km",
            GeoUnit::Miles => "mi",
            GeoUnit::Feet => "ft",
        }
    }
}

impl GeoSearchArgs {
    pub fn new() -> Self {
        GeoSearchArgs::default()
    }

    /// Stop after `count` matches.
    pub fn count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    /// With [`count`](Self::count), accept any `count` matches instead of
    /// the closest ones (`ANY`).
    pub fn any(mut self) -> Self {
        self.any = true;
        self
    }

    /// Sort matches by distance from the center.
    pub fn order(mut self, order: SortOrder) -> Self {
        self.order = Some(order);
        self
    }

    /// Include each match's coordinate (`WITHCOORD`).
    pub fn with_coord(mut self) -> Self {
        self.with_coord = true;
        self
    }

    /// Include each match's distance from the center (`WITHDIST`).
    pub fn with_dist(mut self) -> Self {
        self.with_dist = true;
        self
    }

    fn plain(&self) -> bool {
        !self.with_coord && !self.with_dist
    }
}

impl<'a, KS, VS, C: Connector> GeoOps<'a, KS, VS, C> {
    pub(crate) fn new(template: &'a Template<KS, VS, C>) -> Self {
        GeoOps { template }
    }

    /// <https://redis.io/commands/geoadd>
    ///
    /// Returns how many members were newly added.
    ///
    /// ```
    /// # helper::with_template(|template| async move {
    /// # use typered::ops::{GeoUnit, Point};
    /// # let key = "doctest_geo_geoadd_1";
    /// # template.del(&[key]).await?;
    /// let ops = template.geo_ops();
    /// let palermo = Point { longitude: 13.361389, latitude: 38.115556 };
    /// let catania = Point { longitude: 15.087269, latitude: 37.502669 };
    /// let res = ops.geoadd(key, &[(palermo, "Palermo"), (catania, "Catania")]).await?;
    /// assert_eq!(2, res);
    /// let res = ops.geodist(key, "Palermo", "Catania", GeoUnit::Kilometers).await?;
    /// assert!(res.unwrap() > 160.0);
    /// # Ok(())})?; Ok::<(), helper::BoxError>(())
    /// ```
    pub async fn geoadd<K: ?Sized, V>(&self, key: &K, entries: &[(Point, V)]) -> Result<usize, Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V>,
    {
        if entries.is_empty() {
            return Err(ErrorKind::InvalidArgument("geoadd requires at least one member").into());
        }
        let mut cmd = Command::new("GEOADD");
        cmd.arg(self.template.raw_key(key)?);
        for (point, member) in entries {
            cmd.arg_double(point.longitude)
                .arg_double(point.latitude)
                .arg(self.template.raw_value(member)?);
        }
        Ok(self.template.execute(&cmd).await?.into_integer()? as usize)
    }

    /// <https://redis.io/commands/geopos>
    ///
    /// One optional coordinate per queried member, in order.
    pub async fn geopos<K: ?Sized, V>(&self, key: &K, members: &[V]) -> Result<Vec<Option<Point>>, Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V>,
    {
        if members.is_empty() {
            return Ok(vec![]);
        }
        let mut cmd = Command::new("GEOPOS");
        cmd.arg(self.template.raw_key(key)?);
        for member in members {
            cmd.arg(self.template.raw_value(member)?);
        }
        self.template
            .execute(&cmd)
            .await?
            .into_array()?
            .into_iter()
            .map(|item| match item.into_opt_array()? {
                Some(pair) => Ok(Some(point_from_pair(pair)?)),
                None => Ok(None),
            })
            .collect()
    }

    /// <https://redis.io/commands/geodist>
    ///
    /// `None` when either member is missing from the index.
    pub async fn geodist<K: ?Sized, A: ?Sized, B: ?Sized>(
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
        let mut cmd = Command::new("GEODIST");
        cmd.arg(self.template.raw_key(key)?)
            .arg(self.template.raw_value(from)?)
            .arg(self.template.raw_value(to)?)
            .arg_static(unit.keyword());
        self.template
            .execute(&cmd)
            .await?
            .into_opt_double()
            .map_err(Into::into)
    }

    /// <https://redis.io/commands/geohash>
    ///
    /// One optional geohash string per queried member, in order.
    pub async fn geohash<K: ?Sized, V>(&self, key: &K, members: &[V]) -> Result<Vec<Option<String>>, Error>
    where
        KS: Serializer<K>,
        VS: Serializer<V>,
    {
        if members.is_empty() {
            return Ok(vec![]);
        }
        let mut cmd = Command::new("GEOHASH");
        cmd.arg(self.template.raw_key(key)?);
        for member in members {
            cmd.arg(self.template.raw_value(member)?);
        }
        self.template
            .execute(&cmd)
            .await?
            .into_array()?
            .into_iter()
            .map(|item| match item.into_opt_blob()? {
                Some(raw) => Ok(Some(String::from_utf8_lossy(&raw).into_owned())),
                None => Ok(None),
            })
            .collect()
    }

    /// Removes members from the index.
    ///
    /// Geo indexes have no removal command of their own; this issues the
    /// sorted set `ZREM` against the same key.
    pub async fn georemove<K: ?Sized, V>(&self, key: &K, members: &[V]) -> Result<usize, Error>
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

    /// <https://redis.io/commands/geosearch>
    ///
    /// Searches the area described by `from` and `shape`. Distances are
    /// reported in the unit the shape was given in.
    pub async fn geosearch<K: ?Sized, Q: ?Sized, V>(
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
        let mut cmd = Command::new("GEOSEARCH");
        cmd.arg(self.template.raw_key(key)?);
        match from {
            GeoFrom::Member(member) => {
                cmd.arg_static("FROMMEMBER")
                    .arg(self.template.raw_value(member)?);
            }
            GeoFrom::Position(point) => {
                cmd.arg_static("FROMLONLAT")
                    .arg_double(point.longitude)
                    .arg_double(point.latitude);
            }
        }
        match shape {
            GeoShape::Radius(radius, unit) => {
                cmd.arg_static("BYRADIUS")
                    .arg_double(radius)
                    .arg_static(unit.keyword());
            }
            GeoShape::Rectangle(width, height, unit) => {
                cmd.arg_static("BYBOX")
                    .arg_double(width)
                    .arg_double(height)
                    .arg_static(unit.keyword());
            }
        }
        if let Some(order) = args.order {
            cmd.arg_static(match order {
                SortOrder::Ascending => "ASC",
                SortOrder::Descending => "DESC",
            });
        }
        if let Some(count) = args.count {
            cmd.arg_static("COUNT").arg_uint(count as u64);
            if args.any {
                cmd.arg_static("ANY");
            }
        }
        if args.with_coord {
            cmd.arg_static("WITHCOORD");
        }
        if args.with_dist {
            cmd.arg_static("WITHDIST");
        }

        let items = self.template.execute(&cmd).await?.into_array()?;
        items
            .into_iter()
            .map(|item| self.search_result(item, &args))
            .collect()
    }

    /// Decodes one search match.
    ///
    /// Without flags each match is a bare member; with flags it is an array
    /// of member, then distance (`WITHDIST`), then coordinate (`WITHCOORD`),
    /// in that order.
    fn search_result<V>(&self, item: Value, args: &GeoSearchArgs) -> Result<GeoResult<V>, Error>
    where
        VS: Deserializer<V>,
    {
        if args.plain() {
            return Ok(GeoResult {
                member: self.template.read_value(&item.into_blob()?)?,
                distance: None,
                point: None,
            });
        }

        let mut parts = item.into_array()?.into_iter();
        let member = match parts.next() {
            Some(member) => self.template.read_value(&member.into_blob()?)?,
            None => return Err(TypeError::other("geosearch match", "empty array").into()),
        };
        let distance = if args.with_dist {
            match parts.next() {
                Some(raw) => Some(raw.into_double()?),
                None => return Err(TypeError::other("geosearch distance", "missing").into()),
            }
        } else {
            None
        };
        let point = if args.with_coord {
            match parts.next() {
                Some(raw) => Some(point_from_pair(raw.into_array()?)?),
                None => return Err(TypeError::other("geosearch coordinate", "missing").into()),
            }
        } else {
            None
        };

        Ok(GeoResult {
            member,
            distance,
            point,
        })
    }
}

fn point_from_pair(mut pair: Vec<Value>) -> Result<Point, Error> {
    let latitude = pair.pop();
    let longitude = pair.pop();
    match (longitude, latitude) {
        (Some(longitude), Some(latitude)) if pair.is_empty() => Ok(Point {
            longitude: longitude.into_double()?,
            latitude: latitude.into_double()?,
        }),
        _ => Err(TypeError::other("coordinate pair", "malformed pair").into()),
    }
}

impl<'a, K: ?Sized, KS, VS, C: Connector> BoundGeoOps<'a, K, KS, VS, C>
where
    KS: Serializer<K>,
{
    pub(crate) fn new(ops: GeoOps<'a, KS, VS, C>, key: &'a K) -> Self {
        BoundGeoOps { ops, key }
    }

    /// The key every call operates on.
    pub fn key(&self) -> &K {
        self.key
    }

    /// Bound [`geoadd`](GeoOps::geoadd).
    pub async fn geoadd<V>(&self, entries: &[(Point, V)]) -> Result<usize, Error>
    where
        VS: Serializer<V>,
    {
        self.ops.geoadd(self.key, entries).await
    }

    /// Bound [`geopos`](GeoOps::geopos).
    pub async fn geopos<V>(&self, members: &[V]) -> Result<Vec<Option<Point>>, Error>
    where
        VS: Serializer<V>,
    {
        self.ops.geopos(self.key, members).await
    }

    /// Bound [`geodist`](GeoOps::geodist).
    pub async fn geodist<A: ?Sized, B: ?Sized>(
        &self,
        from: &A,
        to: &B,
        unit: GeoUnit,
    ) -> Result<Option<f64>, Error>
    where
        VS: Serializer<A> + Serializer<B>,
    {
        self.ops.geodist(self.key, from, to, unit).await
    }

    /// Bound [`geohash`](GeoOps::geohash).
    pub async fn geohash<V>(&self, members: &[V]) -> Result<Vec<Option<String>>, Error>
    where
        VS: Serializer<V>,
    {
        self.ops.geohash(self.key, members).await
    }

    /// Bound [`georemove`](GeoOps::georemove).
    pub async fn georemove<V>(&self, members: &[V]) -> Result<usize, Error>
    where
        VS: Serializer<V>,
    {
        self.ops.georemove(self.key, members).await
    }

    /// Bound [`geosearch`](GeoOps::geosearch).
    pub async fn geosearch<Q: ?Sized, V>(
        &self,
        from: GeoFrom<'_, Q>,
        shape: GeoShape,
        args: GeoSearchArgs,
    ) -> Result<Vec<GeoResult<V>>, Error>
    where
        VS: Serializer<Q> + Deserializer<V>,
    {
        self.ops.geosearch(self.key, from, shape, args).await
    }
}
