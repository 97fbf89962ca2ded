// crates\mh_measure\src\units.rs
//! 长度/面积单位定义与换算
//!
//! 换算以基准单位为枢轴：长度为米，面积为平方米。
//! 先除以 `from` 单位的每米系数得到基准值，再乘以 `to` 单位的系数。
//! 不做任何舍入，显示精度由调用方决定。
//!
//! # 示例
//!
//! ```
//! use mh_measure::units::{convert_length, LengthUnit};
//!
//! let miles = convert_length(Some(1609.344), LengthUnit::Meters, LengthUnit::Miles);
//! assert!((miles.unwrap() - 1.0).abs() < 1e-5);
//!
//! // 缺失值原样传播，绝不当作零
//! assert_eq!(convert_length(None, LengthUnit::Meters, LengthUnit::Feet), None);
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// 长度单位
// ============================================================================

/// 长度单位（封闭集合）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LengthUnit {
    /// 厘米
    Centimeters,
    /// 米（基准单位）
    Meters,
    /// 千米
    Kilometers,
    /// 英寸
    Inches,
    /// 英尺
    Feet,
    /// 码
    Yards,
    /// 英里
    Miles,
    /// 海里
    NauticalMiles,
}

impl LengthUnit {
    /// 全部长度单位
    pub const ALL: [Self; 8] = [
        Self::Centimeters,
        Self::Meters,
        Self::Kilometers,
        Self::Inches,
        Self::Feet,
        Self::Yards,
        Self::Miles,
        Self::NauticalMiles,
    ];

    /// 每米对应的本单位数量
    #[inline]
    #[must_use]
    pub fn per_meter(self) -> f64 {
        match self {
            Self::Centimeters => 100.0,
            Self::Meters => 1.0,
            Self::Kilometers => 0.001,
            Self::Inches => 39.370_078_7,
            Self::Feet => 3.280_839_9,
            Self::Yards => 1.093_613_3,
            Self::Miles => 0.000_621_370_092_2,
            Self::NauticalMiles => 0.000_539_956_803,
        }
    }

    /// 单位缩写
    #[must_use]
    pub fn abbreviation(self) -> &'static str {
        match self {
            Self::Centimeters => "cm",
            Self::Meters => "m",
            Self::Kilometers => "km",
            Self::Inches => "in",
            Self::Feet => "ft",
            Self::Yards => "yd",
            Self::Miles => "mi",
            Self::NauticalMiles => "nmi",
        }
    }
}

impl std::fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

// ============================================================================
// 面积单位
// ============================================================================

/// 面积单位（封闭集合）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AreaUnit {
    /// 平方英里
    SquareMiles,
    /// 平方米（基准单位）
    SquareMeters,
    /// 平方千米
    SquareKilometers,
    /// 平方英尺
    SquareFeet,
    /// 英亩
    Acres,
    /// 公顷
    Hectares,
}

impl AreaUnit {
    /// 全部面积单位
    pub const ALL: [Self; 6] = [
        Self::SquareMiles,
        Self::SquareMeters,
        Self::SquareKilometers,
        Self::SquareFeet,
        Self::Acres,
        Self::Hectares,
    ];

    /// 每平方米对应的本单位数量
    #[inline]
    #[must_use]
    pub fn per_square_meter(self) -> f64 {
        match self {
            Self::SquareMiles => 0.000_000_386_100_3,
            Self::SquareMeters => 1.0,
            Self::SquareKilometers => 0.000_001,
            Self::SquareFeet => 10.763_911,
            Self::Acres => 0.000_247_105_381,
            Self::Hectares => 0.000_1,
        }
    }

    /// 单位缩写
    #[must_use]
    pub fn abbreviation(self) -> &'static str {
        match self {
            Self::SquareMiles => "mi²",
            Self::SquareMeters => "m²",
            Self::SquareKilometers => "km²",
            Self::SquareFeet => "ft²",
            Self::Acres => "ac",
            Self::Hectares => "ha",
        }
    }
}

impl std::fmt::Display for AreaUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

// ============================================================================
// 换算函数
// ============================================================================

/// 长度单位换算
///
/// 先除以 `from` 的每米系数得到米值，再乘以 `to` 的每米系数。
/// 同单位换算恒等返回；缺失值原样传播（区分"尚未测量"与"测量结果为零"）。
#[inline]
#[must_use]
pub fn convert_length(value: Option<f64>, from: LengthUnit, to: LengthUnit) -> Option<f64> {
    if from == to {
        return value;
    }
    value.map(|v| v / from.per_meter() * to.per_meter())
}

/// 面积单位换算（单向：始终从平方米换出）
///
/// 缺失值原样传播。
#[inline]
#[must_use]
pub fn convert_area(value: Option<f64>, to: AreaUnit) -> Option<f64> {
    value.map(|v| v * to.per_square_meter())
}

// ============================================================================
// 测试
// ============================================================================
