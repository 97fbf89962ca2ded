//! Web Mercator 正逆投影 (EPSG:3857 / 102100 / 102113)
//!
//! 也称为 Pseudo Mercator 或 Spherical Mercator。
//!
//! # 注意
//!
//! Web Mercator 将地球视为正球体，不使用椭球体参数。
//! 归一化流程只用它把顶点还原到经纬度，真正的测量在椭球面上进行。

use crate::geometry::Point2D;
use std::f64::consts::PI;

/// Web Mercator 使用的地球半径（等于 WGS84 长半轴，米）
pub const WEB_MERCATOR_RADIUS: f64 = 6_378_137.0;

/// Web Mercator 最大纬度 (度)
///
/// 对应 y = ±20037508.34... 米
pub const WEB_MERCATOR_MAX_LAT: f64 = 85.051_128_779;

/// Web Mercator 世界范围 (米)
///
/// x, y 的范围都是 [-20037508.34, 20037508.34]
pub const WEB_MERCATOR_MAX_EXTENT: f64 = PI * WEB_MERCATOR_RADIUS;

/// 地理坐标 -> Web Mercator
///
/// # Arguments
/// - `lon`: 经度 (度)
/// - `lat`: 纬度 (度)，超出有效范围会被裁剪
///
/// # Returns
/// (x, y) Web Mercator 坐标 (米)
#[must_use]
pub fn geographic_to_web_mercator(lon: f64, lat: f64) -> (f64, f64) {
    let lat = lat.clamp(-WEB_MERCATOR_MAX_LAT, WEB_MERCATOR_MAX_LAT);

    let x = WEB_MERCATOR_RADIUS * lon.to_radians();
    let lat_rad = lat.to_radians();
    let y = WEB_MERCATOR_RADIUS * ((PI / 4.0 + lat_rad / 2.0).tan()).ln();

    (x, y)
}

/// Web Mercator -> 地理坐标
///
/// # Arguments
/// - `x`: Web Mercator x 坐标 (米)
/// - `y`: Web Mercator y 坐标 (米)
///
/// # Returns
/// (longitude, latitude) 经度和纬度 (度)
#[must_use]
pub fn web_mercator_to_geographic(x: f64, y: f64) -> (f64, f64) {
    let lon = (x / WEB_MERCATOR_RADIUS).to_degrees();
    let lat = (2.0 * (y / WEB_MERCATOR_RADIUS).exp().atan() - PI / 2.0).to_degrees();

    (lon, lat)
}

/// 逐点版本：Web Mercator 点 -> 地理坐标点
#[inline]
#[must_use]
pub fn point_to_geographic(p: Point2D) -> Point2D {
    let (lon, lat) = web_mercator_to_geographic(p.x, p.y);
    Point2D::from_lonlat(lon, lat)
}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_web_mercator_roundtrip() {
        let lon = 116.0;
        let lat = 40.0;

        let (x, y) = geographic_to_web_mercator(lon, lat);
        let (lon2, lat2) = web_mercator_to_geographic(x, y);

        assert!((lon - lon2).abs() < 1e-9);
        assert!((lat - lat2).abs() < 1e-9);
    }

    #[test]
    fn test_web_mercator_origin() {
        let (x, y) = geographic_to_web_mercator(0.0, 0.0);
        assert!(x.abs() < 1e-6);
        assert!(y.abs() < 1e-6);
    }

    #[test]
    fn test_web_mercator_clamp_latitude() {
        // 超出范围的纬度应被裁剪
        let (_, y1) = geographic_to_web_mercator(0.0, 90.0);
        let (_, y2) = geographic_to_web_mercator(0.0, WEB_MERCATOR_MAX_LAT);
        assert!((y1 - y2).abs() < 1e-6);
    }

    #[test]
    fn test_web_mercator_known_values() {
        // 北京约在 116°E, 40°N
        let (x, y) = geographic_to_web_mercator(116.0, 40.0);

        assert!(x > 12_900_000.0 && x < 12_950_000.0, "x out of range: {x}");
        assert!(y > 4_800_000.0 && y < 4_900_000.0, "y out of range: {y}");
    }

    #[test]
    fn test_web_mercator_extent() {
        let (x_max, _) = geographic_to_web_mercator(180.0, 0.0);
        assert!((x_max - WEB_MERCATOR_MAX_EXTENT).abs() < 1.0);

        let (_, y_max) = geographic_to_web_mercator(0.0, WEB_MERCATOR_MAX_LAT);
        assert!((y_max - WEB_MERCATOR_MAX_EXTENT).abs() < 1.0);
    }

    #[test]
    fn test_point_to_geographic() {
        let (x, y) = geographic_to_web_mercator(116.0, 40.0);
        let p = point_to_geographic(Point2D::new(x, y));
        assert!((p.lon() - 116.0).abs() < 1e-9);
        assert!((p.lat() - 40.0).abs() < 1e-9);
    }
}
