// crates\mh_measure\src\sref.rs
//! 空间参考 (WKID)
//!
//! 测量只支持两族坐标系：
//!
//! - Web Mercator 族：WKID 3857 / 102100 / 102113
//! - WGS84 地理坐标：WKID 4326
//!
//! 其他空间参考是硬错误，客户端大地测量无法在任意投影下进行。

use crate::error::{MeasureError, MeasureResult};
use serde::{Deserialize, Serialize};

/// 空间参考，由 WKID（整数形式的 well-known ID）标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpatialReference {
    /// well-known ID
    pub wkid: u32,
}

impl SpatialReference {
    /// 从 WKID 创建
    #[inline]
    #[must_use]
    pub const fn new(wkid: u32) -> Self {
        Self { wkid }
    }

    /// WGS84 地理坐标系 (EPSG:4326)
    #[inline]
    #[must_use]
    pub const fn wgs84() -> Self {
        Self { wkid: 4326 }
    }

    /// Web Mercator (EPSG:3857)
    #[inline]
    #[must_use]
    pub const fn web_mercator() -> Self {
        Self { wkid: 3857 }
    }

    /// 是否为 Web Mercator 族 (3857 / 102100 / 102113)
    #[inline]
    #[must_use]
    pub const fn is_web_mercator(self) -> bool {
        matches!(self.wkid, 3857 | 102_100 | 102_113)
    }

    /// 是否为 WGS84 地理坐标系 (4326)
    #[inline]
    #[must_use]
    pub const fn is_geographic(self) -> bool {
        self.wkid == 4326
    }

    /// 是否为测量支持的空间参考
    #[inline]
    #[must_use]
    pub const fn is_supported(self) -> bool {
        self.is_web_mercator() || self.is_geographic()
    }

    /// 校验空间参考受支持，否则返回 `UnsupportedSpatialReference`
    ///
    /// # Errors
    /// WKID 不在支持集合内时返回错误
    #[inline]
    pub fn ensure_supported(self) -> MeasureResult<()> {
        if self.is_supported() {
            Ok(())
        } else {
            Err(MeasureError::unsupported_spatial_reference(self.wkid))
        }
    }
}

impl std::fmt::Display for SpatialReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "WKID:{}", self.wkid)
    }
}

// ============================================================================
// 测试
// ============================================================================
