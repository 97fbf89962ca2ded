// crates\mh_measure\src\error.rs
//! 测量错误类型
//!
//! 本模块的错误不做内部捕获或翻译，直接向调用方传播。
//!
//! # 错误分类
//!
//! - **空间参考错误**：WKID 不在支持集合内（硬错误，不可重试）
//! - **几何错误**：输入几何为空，无法归一化

use thiserror::Error;

/// 测量模块结果类型
pub type MeasureResult<T> = Result<T, MeasureError>;

/// 测量错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeasureError {
    /// 不支持的空间参考
    ///
    /// 客户端大地测量只能在 Web Mercator 族 (3857/102100/102113)
    /// 或 WGS84 地理坐标 (4326) 下进行。
    #[error("不支持的空间参考 WKID: {wkid} (支持: 4326, 3857, 102100, 102113)")]
    UnsupportedSpatialReference {
        /// 请求的 WKID
        wkid: u32,
    },

    /// 几何为空（没有任何路径/环或顶点）
    #[error("{geometry_kind} 为空，无法测量")]
    EmptyGeometry {
        /// 几何类型名（如 "Polyline"、"Polygon"）
        geometry_kind: &'static str,
    },

    /// 几何变体不支持请求的测量操作（如对点求长度、对折线求面积）
    #[error("{geometry_kind} 不支持{operation}测量")]
    UnsupportedMeasurement {
        /// 几何类型名（如 "Point"、"Polyline"）
        geometry_kind: &'static str,
        /// 操作名（如 "长度"、"面积"）
        operation: &'static str,
    },
}

// ============================================================================
// 便捷构造函数
// ============================================================================

impl MeasureError {
    /// 创建不支持的空间参考错误
    #[inline]
    pub fn unsupported_spatial_reference(wkid: u32) -> Self {
        Self::UnsupportedSpatialReference { wkid }
    }

    /// 创建空几何错误
    #[inline]
    pub fn empty_geometry(geometry_kind: &'static str) -> Self {
        Self::EmptyGeometry { geometry_kind }
    }

    /// 创建不支持的测量操作错误
    #[inline]
    pub fn unsupported_measurement(geometry_kind: &'static str, operation: &'static str) -> Self {
        Self::UnsupportedMeasurement {
            geometry_kind,
            operation,
        }
    }

    /// 检查条件，不满足则返回错误
    #[inline]
    pub fn ensure(cond: bool, err: Self) -> Result<(), Self> {
        if cond {
            Ok(())
        } else {
            Err(err)
        }
    }
}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_spatial_reference_error() {
        let err = MeasureError::unsupported_spatial_reference(3395);
        match &err {
            MeasureError::UnsupportedSpatialReference { wkid } => {
                assert_eq!(*wkid, 3395);
            }
            _ => panic!("错误的错误类型"),
        }
        let msg = format!("{err}");
        assert!(msg.contains("3395"));
        assert!(msg.contains("4326"));
    }

    #[test]
    fn test_empty_geometry_error() {
        let err = MeasureError::empty_geometry("Polygon");
        let msg = format!("{err}");
        assert!(msg.contains("Polygon"));
    }

    #[test]
    fn test_ensure_success() {
        let result = MeasureError::ensure(true, MeasureError::empty_geometry("Polyline"));
        assert!(result.is_ok());
    }

    #[test]
    fn test_ensure_failure() {
        let result = MeasureError::ensure(false, MeasureError::unsupported_spatial_reference(3395));
        assert!(result.is_err());
        match result.unwrap_err() {
            MeasureError::UnsupportedSpatialReference { wkid } => assert_eq!(wkid, 3395),
            _ => panic!("错误的错误类型"),
        }
    }

    #[test]
    fn test_unsupported_measurement_error() {
        let err = MeasureError::unsupported_measurement("Point", "长度");
        let msg = format!("{err}");
        assert!(msg.contains("Point"));
        assert!(msg.contains("长度"));
    }
}
