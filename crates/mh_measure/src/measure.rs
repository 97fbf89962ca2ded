// crates\mh_measure\src\measure.rs
//! 长度/周长/面积测量入口
//!
//! 所有操作都是同步、无共享状态的纯计算：先归一化，再委托给
//! 注入的大地测量后端。归一化失败（不支持的空间参考）原样向上
//! 传播，没有重试或回退路径。
//!
//! # 示例
//!
//! ```
//! use mh_measure::prelude::*;
//!
//! let measure = GeodesicMeasure::wgs84();
//! let line = Polyline::single_path(
//!     vec![Point2D::from_lonlat(0.0, 0.0), Point2D::from_lonlat(1.0, 0.0)],
//!     SpatialReference::wgs84(),
//! );
//! let meters = measure.length(&line).unwrap();
//! assert!((meters - 111_319.0).abs() < 10.0);
//! ```

use crate::error::{MeasureError, MeasureResult};
use crate::geodesic::{EllipsoidalSurface, GeodesicSurface};
use crate::geometry::{Envelope, Geometry, Polygon, Polyline};
use crate::normalize::{normalize_polygon, normalize_polyline};

/// 大地测量器：归一化 + 注入后端的组合
#[derive(Debug, Clone)]
pub struct GeodesicMeasure<G: GeodesicSurface = EllipsoidalSurface> {
    surface: G,
}

impl GeodesicMeasure<EllipsoidalSurface> {
    /// 使用默认 WGS84 椭球面后端创建
    #[must_use]
    pub const fn wgs84() -> Self {
        Self {
            surface: EllipsoidalSurface::wgs84(),
        }
    }
}

impl Default for GeodesicMeasure<EllipsoidalSurface> {
    fn default() -> Self {
        Self::wgs84()
    }
}

impl<G: GeodesicSurface> GeodesicMeasure<G> {
    /// 使用指定后端创建
    #[must_use]
    pub const fn new(surface: G) -> Self {
        Self { surface }
    }

    /// 访问后端
    #[must_use]
    pub const fn surface(&self) -> &G {
        &self.surface
    }

    /// 折线长度（米）
    ///
    /// 归一化后对每条路径求大地线长度并求和。
    ///
    /// # Errors
    /// 空间参考不受支持或几何为空时返回错误
    pub fn length(&self, line: &Polyline) -> MeasureResult<f64> {
        if line.is_empty() {
            return Err(MeasureError::empty_geometry("Polyline"));
        }
        let normalized = normalize_polyline(line)?;

        Ok(normalized
            .paths
            .iter()
            .map(|path| self.surface.geodesic_length(path))
            .sum())
    }

    /// 多边形周长（米）
    ///
    /// 归一化（含闭合环）后对每个环求大地线长度并求和。
    ///
    /// # Errors
    /// 空间参考不受支持或几何为空时返回错误
    pub fn perimeter(&self, poly: &Polygon) -> MeasureResult<f64> {
        if poly.is_empty() {
            return Err(MeasureError::empty_geometry("Polygon"));
        }
        let normalized = normalize_polygon(poly)?;

        Ok(normalized
            .rings
            .iter()
            .map(|ring| self.surface.geodesic_length(ring))
            .sum())
    }

    /// 多边形面积（平方米，非负）
    ///
    /// 归一化后把多边形拆成逐环的单环多边形，对每个环独立取
    /// 大地面积的绝对值并求和。逐环拆分是针对底层库多环缺陷的
    /// 刻意规避；由此不相交外环满足面积可加性，但内环（洞）
    /// 不会被扣除，带洞多边形按实心测量。
    ///
    /// # Errors
    /// 空间参考不受支持或几何为空时返回错误
    pub fn area(&self, poly: &Polygon) -> MeasureResult<f64> {
        if poly.is_empty() {
            return Err(MeasureError::empty_geometry("Polygon"));
        }
        let normalized = normalize_polygon(poly)?;

        Ok(normalized
            .rings
            .iter()
            .map(|ring| self.surface.geodesic_area(ring).abs())
            .sum())
    }

    /// 包络框周长（米）
    ///
    /// 包络框先转换为等价的闭合五点矩形环，再按多边形测量。
    ///
    /// # Errors
    /// 空间参考不受支持时返回错误
    pub fn envelope_perimeter(&self, env: &Envelope) -> MeasureResult<f64> {
        self.perimeter(&env.to_polygon())
    }

    /// 包络框面积（平方米，非负）
    ///
    /// # Errors
    /// 空间参考不受支持时返回错误
    pub fn envelope_area(&self, env: &Envelope) -> MeasureResult<f64> {
        self.area(&env.to_polygon())
    }

    /// 按几何变体分派长度测量（米）
    ///
    /// 折线测长度，多边形/包络框测周长；点是零维几何，没有长度。
    ///
    /// # Errors
    /// 点几何、不支持的空间参考或空几何返回错误
    pub fn geometry_length(&self, geometry: &Geometry) -> MeasureResult<f64> {
        match geometry {
            Geometry::Point { .. } => Err(MeasureError::unsupported_measurement(
                geometry.kind(),
                "长度",
            )),
            Geometry::Polyline(line) => self.length(line),
            Geometry::Polygon(poly) => self.perimeter(poly),
            Geometry::Envelope(env) => self.envelope_perimeter(env),
        }
    }

    /// 按几何变体分派面积测量（平方米，非负）
    ///
    /// 只有多边形和包络框有面积。
    ///
    /// # Errors
    /// 点/折线几何、不支持的空间参考或空几何返回错误
    pub fn geometry_area(&self, geometry: &Geometry) -> MeasureResult<f64> {
        match geometry {
            Geometry::Point { .. } | Geometry::Polyline(_) => Err(
                MeasureError::unsupported_measurement(geometry.kind(), "面积"),
            ),
            Geometry::Polygon(poly) => self.area(poly),
            Geometry::Envelope(env) => self.envelope_area(env),
        }
    }
}

// ============================================================================
// 测试
// ============================================================================
