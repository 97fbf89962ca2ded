// crates\mh_measure\src\geodesic.rs
//! 大地测量后端
//!
//! 测量组件不自己实现椭球大地测量学，而是依赖注入的
//! [`GeodesicSurface`] 接口。本模块同时提供默认实现
//! [`EllipsoidalSurface`]：
//!
//! - 长度：逐段 Vincenty 反解（毫米级精度），迭代不收敛时
//!   回退 Haversine 公式
//! - 面积：等积球 (authalic sphere) 上的球面多边形公式
//!   (Chamberlain & Duquette)，返回带符号面积
//!
//! 单元测试可以用已知解析答案的桩实现替换默认后端。

use crate::geometry::Point2D;
use serde::{Deserialize, Serialize};

/// 地球平均半径 (米) - 用于 Haversine 公式
pub const EARTH_MEAN_RADIUS: f64 = 6_371_008.8;

// ============================================================================
// 椭球体
// ============================================================================

/// 地球椭球体
///
/// 由长半轴与扁率定义，并提供派生参数的计算方法。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ellipsoid {
    /// 长半轴 (m)
    pub a: f64,
    /// 扁率 (flattening)
    pub f: f64,
}

impl Ellipsoid {
    /// WGS84 椭球体 (GPS 标准)
    ///
    /// - EPSG: 7030
    /// - 长半轴: 6378137.0 m
    /// - 扁率: 1/298.257223563
    pub const WGS84: Self = Self {
        a: 6_378_137.0,
        f: 1.0 / 298.257_223_563,
    };

    /// 从长半轴和扁率创建椭球体
    #[must_use]
    pub const fn new(a: f64, f: f64) -> Self {
        Self { a, f }
    }

    /// 短半轴 b = a(1-f)
    #[inline]
    #[must_use]
    pub fn b(&self) -> f64 {
        self.a * (1.0 - self.f)
    }

    /// 第一偏心率的平方 e² = 2f - f²
    #[inline]
    #[must_use]
    pub fn e2(&self) -> f64 {
        self.f * (2.0 - self.f)
    }

    /// 第一偏心率 e = √e²
    #[inline]
    #[must_use]
    pub fn e(&self) -> f64 {
        self.e2().sqrt()
    }

    /// 椭球体表面积
    #[must_use]
    pub fn surface_area(&self) -> f64 {
        let a = self.a;
        let e = self.e();

        if e < 1e-10 {
            // 近似球体
            4.0 * std::f64::consts::PI * a * a
        } else {
            // 扁椭球体
            2.0 * std::f64::consts::PI
                * a
                * a
                * (1.0 + ((1.0 - e * e) / e) * ((1.0 + e) / (1.0 - e)).ln() / 2.0)
        }
    }

    /// 等积球半径（表面积与椭球相同的球的半径）
    ///
    /// WGS84 下约 6371007.18 m，用于球面面积公式。
    #[must_use]
    pub fn authalic_radius(&self) -> f64 {
        (self.surface_area() / (4.0 * std::f64::consts::PI)).sqrt()
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Self::WGS84
    }
}

impl std::fmt::Display for Ellipsoid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ellipsoid(a={}, f=1/{:.6})", self.a, 1.0 / self.f)
    }
}

// ============================================================================
// 大地测量接口
// ============================================================================

/// 大地测量后端接口
///
/// 两个能力均在地理坐标（经纬度，度）上操作：
///
/// - `geodesic_length`: 顶点序列的大地线长度（米）
/// - `geodesic_area`: 闭合环的带符号面积（平方米），
///   符号由环的绕序决定，调用方按需取绝对值
pub trait GeodesicSurface {
    /// 计算路径的大地线长度（米）
    ///
    /// 少于两个顶点的路径长度为零。
    fn geodesic_length(&self, path: &[Point2D]) -> f64;

    /// 计算单个闭合环的带符号面积（平方米）
    ///
    /// 少于四个顶点（三个独立顶点加闭合点）的环面积为零。
    fn geodesic_area(&self, ring: &[Point2D]) -> f64;
}

// ============================================================================
// 默认椭球面实现
// ============================================================================

/// 默认大地测量后端：Vincenty 长度 + 等积球面积
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EllipsoidalSurface {
    /// 使用的椭球体
    pub ellipsoid: Ellipsoid,
}

impl EllipsoidalSurface {
    /// 使用指定椭球体创建
    #[must_use]
    pub const fn new(ellipsoid: Ellipsoid) -> Self {
        Self { ellipsoid }
    }

    /// WGS84 椭球面
    #[must_use]
    pub const fn wgs84() -> Self {
        Self::new(Ellipsoid::WGS84)
    }

    /// 单段距离：Vincenty 反解，不收敛时回退 Haversine
    fn segment_distance(&self, p1: &Point2D, p2: &Point2D) -> f64 {
        self.vincenty_distance(p1, p2)
            .unwrap_or_else(|| haversine_distance(p1, p2, EARTH_MEAN_RADIUS))
    }

    /// Vincenty 公式计算椭球面距离
    ///
    /// # Returns
    /// 测地线距离（米），如果迭代不收敛返回 None
    #[must_use]
    pub fn vincenty_distance(&self, p1: &Point2D, p2: &Point2D) -> Option<f64> {
        let a = self.ellipsoid.a;
        let f = self.ellipsoid.f;
        let b = self.ellipsoid.b();

        let phi1 = p1.y.to_radians();
        let phi2 = p2.y.to_radians();
        let l = (p2.x - p1.x).to_radians();

        // Reduced latitudes
        let u1 = ((1.0 - f) * phi1.tan()).atan();
        let u2 = ((1.0 - f) * phi2.tan()).atan();

        let sin_u1 = u1.sin();
        let cos_u1 = u1.cos();
        let sin_u2 = u2.sin();
        let cos_u2 = u2.cos();

        // 迭代求解 λ
        let mut lambda = l;
        let mut lambda_prev;
        let mut cos_sq_alpha = 0.0;
        let mut sin_sigma = 0.0;
        let mut cos_sigma = 0.0;
        let mut cos_2sigma_m = 0.0;
        let mut sigma = 0.0;
        let mut converged = false;

        const MAX_ITER: usize = 100;
        const TOLERANCE: f64 = 1e-12;

        for _ in 0..MAX_ITER {
            let sin_lambda = lambda.sin();
            let cos_lambda = lambda.cos();

            sin_sigma = ((cos_u2 * sin_lambda).powi(2)
                + (cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda).powi(2))
            .sqrt();

            if sin_sigma < 1e-12 {
                // 两点重合
                return Some(0.0);
            }

            cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
            sigma = sin_sigma.atan2(cos_sigma);

            let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
            cos_sq_alpha = 1.0 - sin_alpha.powi(2);

            cos_2sigma_m = if cos_sq_alpha.abs() < 1e-12 {
                0.0
            } else {
                cos_sigma - 2.0 * sin_u1 * sin_u2 / cos_sq_alpha
            };

            let c = f / 16.0 * cos_sq_alpha * (4.0 + f * (4.0 - 3.0 * cos_sq_alpha));

            lambda_prev = lambda;
            lambda = l
                + (1.0 - c)
                    * f
                    * sin_alpha
                    * (sigma
                        + c * sin_sigma
                            * (cos_2sigma_m
                                + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m.powi(2))));

            if (lambda - lambda_prev).abs() < TOLERANCE {
                converged = true;
                break;
            }
        }

        if !converged {
            // 近对跖点等情形迭代发散
            return None;
        }

        // 计算距离
        let u_sq = cos_sq_alpha * (a * a - b * b) / (b * b);
        let aa = 1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
        let bb = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));

        let delta_sigma = bb
            * sin_sigma
            * (cos_2sigma_m
                + bb / 4.0
                    * (cos_sigma * (-1.0 + 2.0 * cos_2sigma_m.powi(2))
                        - bb / 6.0
                            * cos_2sigma_m
                            * (-3.0 + 4.0 * sin_sigma.powi(2))
                            * (-3.0 + 4.0 * cos_2sigma_m.powi(2))));

        Some(b * aa * (sigma - delta_sigma))
    }
}

impl Default for EllipsoidalSurface {
    fn default() -> Self {
        Self::wgs84()
    }
}

impl GeodesicSurface for EllipsoidalSurface {
    fn geodesic_length(&self, path: &[Point2D]) -> f64 {
        path.windows(2)
            .map(|w| self.segment_distance(&w[0], &w[1]))
            .sum()
    }

    fn geodesic_area(&self, ring: &[Point2D]) -> f64 {
        if ring.len() < 4 {
            return 0.0;
        }

        // 球面多边形面积 (Chamberlain & Duquette)：
        // A = R²/2 · Σ (λ₂-λ₁)(2 + sinφ₁ + sinφ₂)
        let r = self.ellipsoid.authalic_radius();
        let sum: f64 = ring
            .windows(2)
            .map(|w| {
                (w[1].x - w[0].x).to_radians()
                    * (2.0 + w[0].y.to_radians().sin() + w[1].y.to_radians().sin())
            })
            .sum();

        sum * r * r / 2.0
    }
}

/// Haversine 公式计算大圆距离
///
/// 将地球视为正球体，精度约 0.5%。
#[must_use]
pub fn haversine_distance(p1: &Point2D, p2: &Point2D, radius: f64) -> f64 {
    let lat1 = p1.y.to_radians();
    let lat2 = p2.y.to_radians();
    let dlat = lat2 - lat1;
    let dlon = (p2.x - p1.x).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().asin();

    radius * c
}

// ============================================================================
// 测试
// ============================================================================
