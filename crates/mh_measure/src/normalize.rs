//! 几何归一化
//!
//! 把支持的空间参考下的折线/多边形，变换为可以正确进行大地测量的形式：
//!
//! 1. **增密**：在每条线段上插入顶点，使线段长度不超过固定阈值
//!    （几何原生线性单位下的 10000），原始顶点保持为输出的子序列。
//!    这一步限制了后续重投影把"直线段"弯曲到地理坐标系时引入的误差。
//! 2. **重投影**：Web Mercator 族的顶点逐点还原为经纬度；
//!    已是地理坐标 (4326) 的顶点保持不变。
//! 3. **±180° 经线归一化**：对跨越反子午线的路径/环展开经度，
//!    使同一条路径内经度单调一致，避免后续长度/面积计算出现
//!    伪自相交或符号错误。
//!
//! 输入不被修改；输出是新的地理坐标几何。多边形变体额外保证每个
//! 输出环显式闭合（首点等于末点）。

use crate::error::MeasureResult;
use crate::geometry::{ring_is_closed, Point2D, Polygon, Polyline};
use crate::projection::point_to_geographic;
use crate::sref::SpatialReference;

/// 增密阈值：几何原生线性单位下的最大线段长度
///
/// Web Mercator 下为 10000 米；地理坐标下为 10000 度，
/// 即地理坐标输入实际上不会被增密（与源行为一致）。
pub const MAX_SEGMENT_LENGTH: f64 = 10_000.0;

// ============================================================================
// 归一化入口
// ============================================================================

/// 归一化折线
///
/// 增密、重投影到经纬度、展开 ±180° 经线。输出空间参考为 WGS84 (4326)。
///
/// # Errors
/// 空间参考不在支持集合内时返回 `UnsupportedSpatialReference`，
/// 不做任何部分计算。
pub fn normalize_polyline(line: &Polyline) -> MeasureResult<Polyline> {
    line.sref.ensure_supported()?;

    let paths = line
        .paths
        .iter()
        .map(|path| normalize_path(path, line.sref))
        .collect();

    Ok(Polyline::new(paths, SpatialReference::wgs84()))
}

/// 归一化多边形
///
/// 在增密前先闭合每个环（末点与首点不重合时补上首点副本），
/// 使闭合段同样参与增密。输出空间参考为 WGS84 (4326)，
/// 且每个输出环保证显式闭合。
///
/// # Errors
/// 空间参考不在支持集合内时返回 `UnsupportedSpatialReference`，
/// 不做任何部分计算。
pub fn normalize_polygon(poly: &Polygon) -> MeasureResult<Polygon> {
    poly.sref.ensure_supported()?;

    let rings = poly
        .rings
        .iter()
        .map(|ring| {
            let closed = close_ring(ring);
            let mut normalized = normalize_path(&closed, poly.sref);
            // 展开经度后首末点仍需逐位相等
            if !ring_is_closed(&normalized) {
                if let Some(first) = normalized.first().copied() {
                    normalized.push(first);
                }
            }
            normalized
        })
        .collect();

    Ok(Polygon::new(rings, SpatialReference::wgs84()))
}

// ============================================================================
// 归一化步骤
// ============================================================================

/// 单条路径的完整归一化（增密 -> 重投影 -> 经度展开）
fn normalize_path(path: &[Point2D], sref: SpatialReference) -> Vec<Point2D> {
    let dense = densify_path(path, MAX_SEGMENT_LENGTH);

    let mut geographic: Vec<Point2D> = if sref.is_web_mercator() {
        dense.into_iter().map(point_to_geographic).collect()
    } else {
        dense
    };

    unwrap_longitudes(&mut geographic);
    geographic
}

/// 增密路径：插入顶点使每条线段不超过 `max_len`
///
/// 原始顶点保持为输出的子序列；少于两个顶点的路径原样返回。
#[must_use]
pub fn densify_path(path: &[Point2D], max_len: f64) -> Vec<Point2D> {
    if path.len() < 2 {
        return path.to_vec();
    }

    let mut out = Vec::with_capacity(path.len());
    out.push(path[0]);

    for window in path.windows(2) {
        let (a, b) = (window[0], window[1]);
        let dist = a.distance_to(&b);

        if dist > max_len {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let segments = (dist / max_len).ceil() as usize;
            for i in 1..segments {
                #[allow(clippy::cast_precision_loss)]
                let t = i as f64 / segments as f64;
                out.push(a.lerp(&b, t));
            }
        }
        out.push(b);
    }

    out
}

/// 展开经度，使同一路径内相邻顶点经度差不超过 180°
///
/// 跨越反子午线的路径由此获得单调一致的经度表示，
/// 例如 179.5° -> -179.5° 变为 179.5° -> 180.5°。
fn unwrap_longitudes(path: &mut [Point2D]) {
    for i in 1..path.len() {
        let prev = path[i - 1].x;
        let mut lon = path[i].x;
        while lon - prev > 180.0 {
            lon -= 360.0;
        }
        while lon - prev < -180.0 {
            lon += 360.0;
        }
        path[i].x = lon;
    }
}

/// 闭合环：末点与首点不重合时补上首点副本
fn close_ring(ring: &[Point2D]) -> Vec<Point2D> {
    let mut out = ring.to_vec();
    if !ring_is_closed(&out) {
        if let Some(first) = out.first().copied() {
            out.push(first);
        }
    }
    out
}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::geographic_to_web_mercator;

    fn mercator_point(lon: f64, lat: f64) -> Point2D {
        let (x, y) = geographic_to_web_mercator(lon, lat);
        Point2D::new(x, y)
    }

    #[test]
    fn test_densify_bounds_segment_length() {
        let path = vec![Point2D::new(0.0, 0.0), Point2D::new(25_000.0, 0.0)];
        let dense = densify_path(&path, MAX_SEGMENT_LENGTH);

        // 25 km 需要 3 段
        assert_eq!(dense.len(), 4);
        for w in dense.windows(2) {
            assert!(w[0].distance_to(&w[1]) <= MAX_SEGMENT_LENGTH + 1e-6);
        }
    }

    #[test]
    fn test_densify_preserves_original_vertices() {
        let path = vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(15_000.0, 0.0),
            Point2D::new(15_000.0, 3_000.0),
        ];
        let dense = densify_path(&path, MAX_SEGMENT_LENGTH);

        // 原始顶点必须是输出的子序列
        let mut iter = dense.iter();
        for original in &path {
            assert!(
                iter.any(|p| p.coincides_with(original)),
                "missing original vertex {original:?}"
            );
        }
    }

    #[test]
    fn test_densify_short_segment_unchanged() {
        let path = vec![Point2D::new(0.0, 0.0), Point2D::new(100.0, 0.0)];
        let dense = densify_path(&path, MAX_SEGMENT_LENGTH);
        assert_eq!(dense, path);
    }

    #[test]
    fn test_normalize_rejects_unsupported_sref() {
        let line = Polyline::single_path(
            vec![Point2D::new(0.0, 0.0), Point2D::new(1.0, 1.0)],
            SpatialReference::new(3395),
        );
        let err = normalize_polyline(&line).unwrap_err();
        assert!(format!("{err}").contains("3395"));

        let poly = Polygon::single_ring(
            vec![
                Point2D::new(0.0, 0.0),
                Point2D::new(1.0, 0.0),
                Point2D::new(0.0, 1.0),
            ],
            SpatialReference::new(3395),
        );
        assert!(normalize_polygon(&poly).is_err());
    }

    #[test]
    fn test_normalize_reprojects_web_mercator() {
        let line = Polyline::single_path(
            vec![mercator_point(116.0, 40.0), mercator_point(116.1, 40.0)],
            SpatialReference::web_mercator(),
        );
        let normalized = normalize_polyline(&line).expect("normalize");

        assert_eq!(normalized.sref, SpatialReference::wgs84());
        let first = normalized.paths[0][0];
        assert!((first.lon() - 116.0).abs() < 1e-9);
        assert!((first.lat() - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_geographic_left_unchanged() {
        // 地理坐标输入：不重投影，阈值 10000 度也不会触发增密
        let path = vec![
            Point2D::from_lonlat(0.0, 0.0),
            Point2D::from_lonlat(10.0, 0.0),
            Point2D::from_lonlat(10.0, 10.0),
        ];
        let line = Polyline::single_path(path.clone(), SpatialReference::wgs84());
        let normalized = normalize_polyline(&line).expect("normalize");
        assert_eq!(normalized.paths[0], path);
    }

    #[test]
    fn test_normalize_closes_open_ring() {
        let open_ring = vec![
            Point2D::from_lonlat(0.0, 0.0),
            Point2D::from_lonlat(1.0, 0.0),
            Point2D::from_lonlat(1.0, 1.0),
            Point2D::from_lonlat(0.0, 1.0),
        ];
        let poly = Polygon::single_ring(open_ring, SpatialReference::wgs84());
        let normalized = normalize_polygon(&poly).expect("normalize");

        for ring in &normalized.rings {
            assert!(ring_is_closed(ring), "ring not closed: {ring:?}");
        }
    }

    #[test]
    fn test_normalize_already_closed_ring_not_duplicated() {
        let ring = vec![
            Point2D::from_lonlat(0.0, 0.0),
            Point2D::from_lonlat(1.0, 0.0),
            Point2D::from_lonlat(1.0, 1.0),
            Point2D::from_lonlat(0.0, 0.0),
        ];
        let poly = Polygon::single_ring(ring.clone(), SpatialReference::wgs84());
        let normalized = normalize_polygon(&poly).expect("normalize");
        assert_eq!(normalized.rings[0].len(), ring.len());
    }

    #[test]
    fn test_antimeridian_unwrap() {
        // 跨越 ±180° 经线的路径应展开为单调经度
        let line = Polyline::single_path(
            vec![
                Point2D::from_lonlat(179.5, 0.0),
                Point2D::from_lonlat(-179.5, 0.0),
            ],
            SpatialReference::wgs84(),
        );
        let normalized = normalize_polyline(&line).expect("normalize");

        let path = &normalized.paths[0];
        assert!((path[0].lon() - 179.5).abs() < 1e-12);
        assert!((path[1].lon() - 180.5).abs() < 1e-12, "lon: {}", path[1].lon());
    }

    #[test]
    fn test_antimeridian_unwrap_westward() {
        // 向西跨越：-179.5° -> 179.5° 应变为 -180.5°
        let line = Polyline::single_path(
            vec![
                Point2D::from_lonlat(-179.5, 10.0),
                Point2D::from_lonlat(179.5, 10.0),
            ],
            SpatialReference::wgs84(),
        );
        let normalized = normalize_polyline(&line).expect("normalize");
        let path = &normalized.paths[0];
        assert!((path[1].lon() + 180.5).abs() < 1e-12);
    }

    #[test]
    fn test_input_not_mutated() {
        let original = Polyline::single_path(
            vec![mercator_point(0.0, 0.0), mercator_point(1.0, 1.0)],
            SpatialReference::web_mercator(),
        );
        let snapshot = original.clone();
        let _ = normalize_polyline(&original).expect("normalize");
        assert_eq!(original, snapshot);
    }
}
