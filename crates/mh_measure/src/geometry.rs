// crates\mh_measure\src\geometry.rs
//! 值语义几何类型
//!
//! 所有几何均为不可变值类型：变换总是返回新值，调用方无需防御性克隆。
//! 每个几何整体携带一个空间参考，几何内所有顶点共享同一空间参考。
//!
//! # 类型
//!
//! - `Point2D`: 2D 点（x/y 或经度/纬度）
//! - `Polyline`: 有序路径序列，每条路径为有序点序列
//! - `Polygon`: 有序环序列；环不要求预先闭合，归一化会补齐闭合点
//! - `Envelope`: 轴对齐包络框
//! - `Geometry`: 以上类型的封闭和类型，逐操作穷举匹配

use crate::sref::SpatialReference;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

// ============================================================================
// Point2D
// ============================================================================

/// 2D 点 - 用于平面坐标或地理坐标（经度/纬度）
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    /// X 坐标（或经度）
    pub x: f64,
    /// Y 坐标（或纬度）
    pub y: f64,
}

impl Point2D {
    /// 零点常量
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// 创建新的 2D 点
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// 从经纬度创建 (lon, lat)
    #[inline]
    #[must_use]
    pub const fn from_lonlat(lon: f64, lat: f64) -> Self {
        Self { x: lon, y: lat }
    }

    /// 获取经度（假设 x 为经度）
    #[inline]
    #[must_use]
    pub const fn lon(&self) -> f64 {
        self.x
    }

    /// 获取纬度（假设 y 为纬度）
    #[inline]
    #[must_use]
    pub const fn lat(&self) -> f64 {
        self.y
    }

    /// 计算到另一个点的欧几里得距离
    ///
    /// 适用于投影坐标，单位与坐标单位一致。**不要用于经纬度坐标！**
    #[inline]
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// 线性插值
    #[inline]
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    /// 标量乘法
    #[inline]
    #[must_use]
    pub fn scale(&self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// 判断是否为有限数（非 NaN、非 Inf）
    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// 判断两点坐标是否相等（用于环闭合判定）
    #[inline]
    #[must_use]
    pub fn coincides_with(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl Add for Point2D {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Point2D {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl Neg for Point2D {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl Mul<f64> for Point2D {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: f64) -> Self {
        self.scale(scalar)
    }
}

impl From<(f64, f64)> for Point2D {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<Point2D> for (f64, f64) {
    fn from(p: Point2D) -> Self {
        (p.x, p.y)
    }
}

impl From<[f64; 2]> for Point2D {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

// ============================================================================
// Polyline
// ============================================================================

/// 折线：有序的路径序列，每条路径为有序的点序列
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    /// 路径序列
    pub paths: Vec<Vec<Point2D>>,
    /// 空间参考（所有顶点共享）
    pub sref: SpatialReference,
}

impl Polyline {
    /// 创建新折线
    #[must_use]
    pub fn new(paths: Vec<Vec<Point2D>>, sref: SpatialReference) -> Self {
        Self { paths, sref }
    }

    /// 单路径折线
    #[must_use]
    pub fn single_path(path: Vec<Point2D>, sref: SpatialReference) -> Self {
        Self {
            paths: vec![path],
            sref,
        }
    }

    /// 是否不含任何可测量路径（每条路径至少两个顶点才可测长）
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.iter().all(|p| p.len() < 2)
    }
}

// ============================================================================
// Polygon
// ============================================================================

/// 多边形：有序的环序列
///
/// 环不要求预先闭合；归一化会在末点与首点不重合时补上首点副本。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    /// 环序列
    pub rings: Vec<Vec<Point2D>>,
    /// 空间参考（所有顶点共享）
    pub sref: SpatialReference,
}

impl Polygon {
    /// 创建新多边形
    #[must_use]
    pub fn new(rings: Vec<Vec<Point2D>>, sref: SpatialReference) -> Self {
        Self { rings, sref }
    }

    /// 单环多边形
    #[must_use]
    pub fn single_ring(ring: Vec<Point2D>, sref: SpatialReference) -> Self {
        Self {
            rings: vec![ring],
            sref,
        }
    }

    /// 是否不含任何可测量的环（环至少三个独立顶点才有面积）
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rings.iter().all(|r| r.len() < 3)
    }
}

/// 判断环是否已闭合（首末点坐标相等）
///
/// 少于两个点的环视为未闭合。
#[inline]
#[must_use]
pub fn ring_is_closed(ring: &[Point2D]) -> bool {
    match (ring.first(), ring.last()) {
        (Some(first), Some(last)) if ring.len() >= 2 => first.coincides_with(last),
        _ => false,
    }
}

// ============================================================================
// Envelope
// ============================================================================

/// 轴对齐包络框
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// 最小 X
    pub xmin: f64,
    /// 最小 Y
    pub ymin: f64,
    /// 最大 X
    pub xmax: f64,
    /// 最大 Y
    pub ymax: f64,
    /// 空间参考
    pub sref: SpatialReference,
}

impl Envelope {
    /// 创建新包络框（坐标会按 min/max 规整）
    #[must_use]
    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64, sref: SpatialReference) -> Self {
        Self {
            xmin: xmin.min(xmax),
            ymin: ymin.min(ymax),
            xmax: xmin.max(xmax),
            ymax: ymin.max(ymax),
            sref,
        }
    }

    /// 宽度
    #[inline]
    #[must_use]
    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    /// 高度
    #[inline]
    #[must_use]
    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    /// 转换为等价的闭合五点矩形环多边形
    ///
    /// 绕序固定为：左上 -> 右上 -> 右下 -> 左下 -> 左上。
    #[must_use]
    pub fn to_polygon(&self) -> Polygon {
        let ring = vec![
            Point2D::new(self.xmin, self.ymax),
            Point2D::new(self.xmax, self.ymax),
            Point2D::new(self.xmax, self.ymin),
            Point2D::new(self.xmin, self.ymin),
            Point2D::new(self.xmin, self.ymax),
        ];
        Polygon::single_ring(ring, self.sref)
    }
}

// ============================================================================
// Geometry - 封闭和类型
// ============================================================================

/// 几何变体的封闭和类型
///
/// 消费方对每个操作穷举匹配，编译期保证覆盖全部变体。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    /// 单点
    Point {
        /// 位置
        position: Point2D,
        /// 空间参考
        sref: SpatialReference,
    },
    /// 折线
    Polyline(Polyline),
    /// 多边形
    Polygon(Polygon),
    /// 包络框
    Envelope(Envelope),
}

impl Geometry {
    /// 几何的空间参考
    #[must_use]
    pub fn spatial_reference(&self) -> SpatialReference {
        match self {
            Self::Point { sref, .. } => *sref,
            Self::Polyline(line) => line.sref,
            Self::Polygon(poly) => poly.sref,
            Self::Envelope(env) => env.sref,
        }
    }

    /// 几何类型名
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Point { .. } => "Point",
            Self::Polyline(_) => "Polyline",
            Self::Polygon(_) => "Polygon",
            Self::Envelope(_) => "Envelope",
        }
    }
}

impl From<Polyline> for Geometry {
    fn from(line: Polyline) -> Self {
        Self::Polyline(line)
    }
}

impl From<Polygon> for Geometry {
    fn from(poly: Polygon) -> Self {
        Self::Polygon(poly)
    }
}

impl From<Envelope> for Geometry {
    fn from(env: Envelope) -> Self {
        Self::Envelope(env)
    }
}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point2d_euclidean_distance() {
        let p1 = Point2D::new(0.0, 0.0);
        let p2 = Point2D::new(3.0, 4.0);
        assert!((p1.distance_to(&p2) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_point2d_lerp() {
        let p1 = Point2D::new(0.0, 0.0);
        let p2 = Point2D::new(10.0, 20.0);
        let mid = p1.lerp(&p2, 0.5);
        assert!((mid.x - 5.0).abs() < 1e-12);
        assert!((mid.y - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_point2d_lonlat_accessors() {
        let p = Point2D::from_lonlat(116.4, 39.9);
        assert_eq!(p.lon(), 116.4);
        assert_eq!(p.lat(), 39.9);
    }

    #[test]
    fn test_ring_is_closed() {
        let open = vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(1.0, 0.0),
            Point2D::new(1.0, 1.0),
        ];
        assert!(!ring_is_closed(&open));

        let mut closed = open.clone();
        closed.push(open[0]);
        assert!(ring_is_closed(&closed));

        // 退化情形
        assert!(!ring_is_closed(&[]));
        assert!(!ring_is_closed(&[Point2D::ZERO]));
    }

    #[test]
    fn test_envelope_normalizes_extents() {
        let env = Envelope::new(10.0, 20.0, -10.0, -20.0, SpatialReference::wgs84());
        assert_eq!(env.xmin, -10.0);
        assert_eq!(env.ymin, -20.0);
        assert_eq!(env.xmax, 10.0);
        assert_eq!(env.ymax, 20.0);
        assert!((env.width() - 20.0).abs() < 1e-12);
        assert!((env.height() - 40.0).abs() < 1e-12);
    }

    #[test]
    fn test_envelope_to_polygon_winding() {
        let env = Envelope::new(-1.0, -2.0, 3.0, 4.0, SpatialReference::wgs84());
        let poly = env.to_polygon();
        assert_eq!(poly.rings.len(), 1);

        let ring = &poly.rings[0];
        assert_eq!(ring.len(), 5);
        // 左上 -> 右上 -> 右下 -> 左下 -> 左上
        assert_eq!(ring[0], Point2D::new(-1.0, 4.0));
        assert_eq!(ring[1], Point2D::new(3.0, 4.0));
        assert_eq!(ring[2], Point2D::new(3.0, -2.0));
        assert_eq!(ring[3], Point2D::new(-1.0, -2.0));
        assert_eq!(ring[4], ring[0]);
        assert!(ring_is_closed(ring));
    }

    #[test]
    fn test_polyline_empty() {
        let sref = SpatialReference::wgs84();
        assert!(Polyline::new(vec![], sref).is_empty());
        assert!(Polyline::single_path(vec![Point2D::ZERO], sref).is_empty());
        assert!(!Polyline::single_path(vec![Point2D::ZERO, Point2D::new(1.0, 1.0)], sref)
            .is_empty());
    }

    #[test]
    fn test_polygon_empty() {
        let sref = SpatialReference::wgs84();
        assert!(Polygon::new(vec![], sref).is_empty());
        let triangle = vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(1.0, 0.0),
            Point2D::new(0.0, 1.0),
        ];
        assert!(!Polygon::single_ring(triangle, sref).is_empty());
    }

    #[test]
    fn test_geometry_dispatch() {
        let sref = SpatialReference::web_mercator();
        let g: Geometry = Envelope::new(0.0, 0.0, 1.0, 1.0, sref).into();
        assert_eq!(g.spatial_reference(), sref);
        assert_eq!(g.kind(), "Envelope");

        let p = Geometry::Point {
            position: Point2D::ZERO,
            sref: SpatialReference::wgs84(),
        };
        assert_eq!(p.kind(), "Point");
        assert_eq!(p.spatial_reference().wkid, 4326);
    }
}
