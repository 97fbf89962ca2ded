// crates\mh_measure\src/lib.rs
//! 单位换算与大地测量工具库
//!
//! 提供长度/面积单位换算、几何归一化与椭球面长度/周长/面积测量。
//!
//! # 模块
//!
//! - `units`: 长度/面积单位定义与换算（以米/平方米为基准单位）
//! - `sref`: 空间参考 (WKID)，仅支持 Web Mercator 族与 WGS84 地理坐标
//! - `geometry`: 值语义几何类型 (Point2D, Polyline, Polygon, Envelope)
//! - `projection`: Web Mercator 正逆投影
//! - `normalize`: 几何归一化（增密、重投影、±180° 经线归一化、闭合环）
//! - `geodesic`: 大地测量后端接口与默认椭球面实现
//! - `measure`: 长度/周长/面积测量入口
//!
//! # 示例
//!
//! ```
//! use mh_measure::prelude::*;
//!
//! // 单位换算：米 -> 英尺
//! let ft = convert_length(Some(1.0), LengthUnit::Meters, LengthUnit::Feet);
//! assert!((ft.unwrap() - 3.280_839_9).abs() < 1e-9);
//!
//! // 大地测量：Web Mercator 包络框的面积（平方米）
//! let env = Envelope::new(
//!     0.0,
//!     0.0,
//!     10_000.0,
//!     10_000.0,
//!     SpatialReference::web_mercator(),
//! );
//! let measure = GeodesicMeasure::wgs84();
//! let area = measure.envelope_area(&env).unwrap();
//! assert!(area > 0.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod error;
pub mod geodesic;
pub mod geometry;
pub mod measure;
pub mod normalize;
pub mod projection;
pub mod sref;
pub mod units;

/// 预导入模块
pub mod prelude {
    pub use crate::error::{MeasureError, MeasureResult};
    pub use crate::geodesic::{Ellipsoid, EllipsoidalSurface, GeodesicSurface};
    pub use crate::geometry::{Envelope, Geometry, Point2D, Polygon, Polyline};
    pub use crate::measure::GeodesicMeasure;
    pub use crate::normalize::{normalize_polygon, normalize_polyline};
    pub use crate::sref::SpatialReference;
    pub use crate::units::{convert_area, convert_length, AreaUnit, LengthUnit};
}

// 重导出常用类型
pub use error::{MeasureError, MeasureResult};
pub use geodesic::{Ellipsoid, EllipsoidalSurface, GeodesicSurface};
pub use geometry::{Envelope, Geometry, Point2D, Polygon, Polyline};
pub use measure::GeodesicMeasure;
pub use sref::SpatialReference;
pub use units::{convert_area, convert_length, AreaUnit, LengthUnit};
