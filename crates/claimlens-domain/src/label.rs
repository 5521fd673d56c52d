//! Label module - the closed category sets of each dimension
//!
//! Labels are fixed enumerations. Learning adds keywords to existing labels
//! and never introduces new ones, so every label that appears in a result is
//! one of the variants below.

use crate::Dimension;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Efficacy category (dimension 1)
///
/// 26 regulated efficacy categories plus the catch-all [`Efficacy::Other`],
/// each with a stable two-character code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum Efficacy {
    #[serde(rename = "染发")]
    HairDye,
    #[serde(rename = "烫发")]
    Perm,
    #[serde(rename = "祛斑美白")]
    Whitening,
    #[serde(rename = "防晒")]
    SunProtection,
    #[serde(rename = "防脱发")]
    AntiHairLoss,
    #[serde(rename = "祛痘")]
    AntiAcne,
    #[serde(rename = "滋养")]
    Nourishing,
    #[serde(rename = "修护")]
    Repair,
    #[serde(rename = "清洁")]
    Cleansing,
    #[serde(rename = "卸妆")]
    MakeupRemoval,
    #[serde(rename = "保湿")]
    Moisturizing,
    #[serde(rename = "美容修饰")]
    Beautifying,
    #[serde(rename = "芳香")]
    Fragrance,
    #[serde(rename = "除臭")]
    Deodorizing,
    #[serde(rename = "抗皱")]
    AntiWrinkle,
    #[serde(rename = "紧致")]
    Firming,
    #[serde(rename = "舒缓")]
    Soothing,
    #[serde(rename = "控油")]
    OilControl,
    #[serde(rename = "去角质")]
    Exfoliating,
    #[serde(rename = "爽身")]
    Refreshing,
    #[serde(rename = "护发")]
    HairCare,
    #[serde(rename = "防断发")]
    AntiBreakage,
    #[serde(rename = "去屑")]
    AntiDandruff,
    #[serde(rename = "发色护理")]
    HairColorCare,
    #[serde(rename = "脱毛")]
    HairRemoval,
    #[serde(rename = "辅助剃须剃毛")]
    ShavingAid,
    /// Catch-all used when no efficacy keyword matches
    #[serde(rename = "其他")]
    Other,
}

impl Efficacy {
    /// All efficacy labels in code order
    pub const ALL: [Efficacy; 27] = [
        Efficacy::HairDye,
        Efficacy::Perm,
        Efficacy::Whitening,
        Efficacy::SunProtection,
        Efficacy::AntiHairLoss,
        Efficacy::AntiAcne,
        Efficacy::Nourishing,
        Efficacy::Repair,
        Efficacy::Cleansing,
        Efficacy::MakeupRemoval,
        Efficacy::Moisturizing,
        Efficacy::Beautifying,
        Efficacy::Fragrance,
        Efficacy::Deodorizing,
        Efficacy::AntiWrinkle,
        Efficacy::Firming,
        Efficacy::Soothing,
        Efficacy::OilControl,
        Efficacy::Exfoliating,
        Efficacy::Refreshing,
        Efficacy::HairCare,
        Efficacy::AntiBreakage,
        Efficacy::AntiDandruff,
        Efficacy::HairColorCare,
        Efficacy::HairRemoval,
        Efficacy::ShavingAid,
        Efficacy::Other,
    ];

    /// Label name as shown to operators
    pub fn as_str(&self) -> &'static str {
        match self {
            Efficacy::HairDye => "染发",
            Efficacy::Perm => "烫发",
            Efficacy::Whitening => "祛斑美白",
            Efficacy::SunProtection => "防晒",
            Efficacy::AntiHairLoss => "防脱发",
            Efficacy::AntiAcne => "祛痘",
            Efficacy::Nourishing => "滋养",
            Efficacy::Repair => "修护",
            Efficacy::Cleansing => "清洁",
            Efficacy::MakeupRemoval => "卸妆",
            Efficacy::Moisturizing => "保湿",
            Efficacy::Beautifying => "美容修饰",
            Efficacy::Fragrance => "芳香",
            Efficacy::Deodorizing => "除臭",
            Efficacy::AntiWrinkle => "抗皱",
            Efficacy::Firming => "紧致",
            Efficacy::Soothing => "舒缓",
            Efficacy::OilControl => "控油",
            Efficacy::Exfoliating => "去角质",
            Efficacy::Refreshing => "爽身",
            Efficacy::HairCare => "护发",
            Efficacy::AntiBreakage => "防断发",
            Efficacy::AntiDandruff => "去屑",
            Efficacy::HairColorCare => "发色护理",
            Efficacy::HairRemoval => "脱毛",
            Efficacy::ShavingAid => "辅助剃须剃毛",
            Efficacy::Other => "其他",
        }
    }

    /// ASCII key accepted on the command line
    pub fn key(&self) -> &'static str {
        match self {
            Efficacy::HairDye => "hair_dye",
            Efficacy::Perm => "perm",
            Efficacy::Whitening => "whitening",
            Efficacy::SunProtection => "sun_protection",
            Efficacy::AntiHairLoss => "anti_hair_loss",
            Efficacy::AntiAcne => "anti_acne",
            Efficacy::Nourishing => "nourishing",
            Efficacy::Repair => "repair",
            Efficacy::Cleansing => "cleansing",
            Efficacy::MakeupRemoval => "makeup_removal",
            Efficacy::Moisturizing => "moisturizing",
            Efficacy::Beautifying => "beautifying",
            Efficacy::Fragrance => "fragrance",
            Efficacy::Deodorizing => "deodorizing",
            Efficacy::AntiWrinkle => "anti_wrinkle",
            Efficacy::Firming => "firming",
            Efficacy::Soothing => "soothing",
            Efficacy::OilControl => "oil_control",
            Efficacy::Exfoliating => "exfoliating",
            Efficacy::Refreshing => "refreshing",
            Efficacy::HairCare => "hair_care",
            Efficacy::AntiBreakage => "anti_breakage",
            Efficacy::AntiDandruff => "anti_dandruff",
            Efficacy::HairColorCare => "hair_color_care",
            Efficacy::HairRemoval => "hair_removal",
            Efficacy::ShavingAid => "shaving_aid",
            Efficacy::Other => "other",
        }
    }

    /// Stable two-character category code ("01".."26", "A")
    pub fn code(&self) -> &'static str {
        match self {
            Efficacy::HairDye => "01",
            Efficacy::Perm => "02",
            Efficacy::Whitening => "03",
            Efficacy::SunProtection => "04",
            Efficacy::AntiHairLoss => "05",
            Efficacy::AntiAcne => "06",
            Efficacy::Nourishing => "07",
            Efficacy::Repair => "08",
            Efficacy::Cleansing => "09",
            Efficacy::MakeupRemoval => "10",
            Efficacy::Moisturizing => "11",
            Efficacy::Beautifying => "12",
            Efficacy::Fragrance => "13",
            Efficacy::Deodorizing => "14",
            Efficacy::AntiWrinkle => "15",
            Efficacy::Firming => "16",
            Efficacy::Soothing => "17",
            Efficacy::OilControl => "18",
            Efficacy::Exfoliating => "19",
            Efficacy::Refreshing => "20",
            Efficacy::HairCare => "21",
            Efficacy::AntiBreakage => "22",
            Efficacy::AntiDandruff => "23",
            Efficacy::HairColorCare => "24",
            Efficacy::HairRemoval => "25",
            Efficacy::ShavingAid => "26",
            Efficacy::Other => "A",
        }
    }

    /// Regulatory definition of the category
    pub fn description(&self) -> &'static str {
        match self {
            Efficacy::HairDye => "以改变头发颜色为目的，使用后即时清洗不能恢复头发原有颜色",
            Efficacy::Perm => "用于改变头发弯曲度（弯曲或拉直），并维持相对稳定",
            Efficacy::Whitening => "有助于减轻或减缓皮肤色素沉着，达到皮肤美白增白效果",
            Efficacy::SunProtection => "用于保护皮肤、口唇免受特定紫外线所带来的损伤",
            Efficacy::AntiHairLoss => "有助于改善或减少头发脱落",
            Efficacy::AntiAcne => "有助于减少或减缓粉刺的发生；有助于粉刺发生后皮肤的恢复",
            Efficacy::Nourishing => "有助于为施用部位提供滋养作用",
            Efficacy::Repair => "有助于维护施用部位保持正常状态",
            Efficacy::Cleansing => "用于除去施用部位表面的污垢及附着物",
            Efficacy::MakeupRemoval => "用于除去施用部位的彩妆等其他化妆品",
            Efficacy::Moisturizing => "用于补充或增强施用部位水分、油脂等成分含量",
            Efficacy::Beautifying => "用于暂时改变施用部位外观状态，达到美化、修饰等作用",
            Efficacy::Fragrance => "具有芳香成分，有助于修饰体味，可增加香味",
            Efficacy::Deodorizing => "有助于减轻或遮盖体臭",
            Efficacy::AntiWrinkle => "有助于减缓皮肤皱纹产生或使皱纹变得不明显",
            Efficacy::Firming => "有助于保持皮肤的紧实度、弹性",
            Efficacy::Soothing => "有助于改善皮肤刺激等状态",
            Efficacy::OilControl => "有助于减缓施用部位皮脂分泌和沉积",
            Efficacy::Exfoliating => "有助于促进皮肤角质的脱落或促进角质更新",
            Efficacy::Refreshing => "有助于保持皮肤干爽或增强皮肤清凉感",
            Efficacy::HairCare => "有助于改善头发、胡须的梳理性，防止静电，保持或增强毛发的光泽",
            Efficacy::AntiBreakage => "有助于改善或减少头发断裂、分叉；有助于保持或增强头发韧性",
            Efficacy::AntiDandruff => "有助于减缓头屑的产生；有助于减少附着于头皮、头发的头屑",
            Efficacy::HairColorCare => "有助于在染发前后保持头发颜色的稳定",
            Efficacy::HairRemoval => "用于减少或除去体毛",
            Efficacy::ShavingAid => "用于软化、膨胀须发，有助于剃须剃毛时皮肤润滑",
            Efficacy::Other => "不符合以上规则的其他功效",
        }
    }

    /// Parse from display name, ASCII key, or code
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.into_iter().find(|e| {
            e.as_str() == s || e.key().eq_ignore_ascii_case(s) || e.code().eq_ignore_ascii_case(s)
        })
    }
}

/// Claim-type category (dimension 2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ClaimType {
    /// Mildness / non-irritation claim
    #[serde(rename = "温和宣称")]
    Mild,
    /// Ingredient-efficacy claim
    #[serde(rename = "原料功效")]
    Ingredient,
    /// Quantified claim (durations, percentages, test data)
    #[serde(rename = "量化指标")]
    Quantified,
    /// Preference / satisfaction claim
    #[serde(rename = "喜好度")]
    Preference,
    /// Texture claim
    #[serde(rename = "质地")]
    Texture,
    /// In-use sensation; fallback when nothing matches
    #[serde(rename = "使用感受")]
    UsageFeel,
    /// After-use experience
    #[serde(rename = "使用后体验")]
    AfterUse,
}

impl ClaimType {
    /// All claim types in declaration order
    pub const ALL: [ClaimType; 7] = [
        ClaimType::Mild,
        ClaimType::Ingredient,
        ClaimType::Quantified,
        ClaimType::Preference,
        ClaimType::Texture,
        ClaimType::UsageFeel,
        ClaimType::AfterUse,
    ];

    /// Label name as shown to operators
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimType::Mild => "温和宣称",
            ClaimType::Ingredient => "原料功效",
            ClaimType::Quantified => "量化指标",
            ClaimType::Preference => "喜好度",
            ClaimType::Texture => "质地",
            ClaimType::UsageFeel => "使用感受",
            ClaimType::AfterUse => "使用后体验",
        }
    }

    /// ASCII key accepted on the command line
    pub fn key(&self) -> &'static str {
        match self {
            ClaimType::Mild => "mild",
            ClaimType::Ingredient => "ingredient",
            ClaimType::Quantified => "quantified",
            ClaimType::Preference => "preference",
            ClaimType::Texture => "texture",
            ClaimType::UsageFeel => "usage_feel",
            ClaimType::AfterUse => "after_use",
        }
    }

    /// Parse from display name or ASCII key
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s || t.key().eq_ignore_ascii_case(s))
    }
}

/// Persistence (dimension 3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Persistence {
    /// Immediate effect; the default when no cue matches
    #[serde(rename = "即时")]
    Immediate,
    /// Durable / long-lasting effect
    #[serde(rename = "持久")]
    Durable,
}

impl Persistence {
    /// Both persistence labels, immediate first
    pub const ALL: [Persistence; 2] = [Persistence::Immediate, Persistence::Durable];

    /// Label name as shown to operators
    pub fn as_str(&self) -> &'static str {
        match self {
            Persistence::Immediate => "即时",
            Persistence::Durable => "持久",
        }
    }

    /// ASCII key accepted on the command line
    pub fn key(&self) -> &'static str {
        match self {
            Persistence::Immediate => "immediate",
            Persistence::Durable => "durable",
        }
    }

    /// Parse from display name or ASCII key
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s || p.key().eq_ignore_ascii_case(s))
    }
}

/// A label tagged with its dimension
///
/// Serialized adjacently tagged, e.g. `{"dimension":"efficacy","value":"保湿"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "dimension", content = "value", rename_all = "snake_case")]
pub enum Label {
    /// Dimension 1 label
    Efficacy(Efficacy),
    /// Dimension 2 label
    ClaimType(ClaimType),
    /// Dimension 3 label
    Persistence(Persistence),
}

impl Label {
    /// The dimension this label belongs to
    pub fn dimension(&self) -> Dimension {
        match self {
            Label::Efficacy(_) => Dimension::Efficacy,
            Label::ClaimType(_) => Dimension::ClaimType,
            Label::Persistence(_) => Dimension::Persistence,
        }
    }

    /// Label name as shown to operators
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Efficacy(e) => e.as_str(),
            Label::ClaimType(t) => t.as_str(),
            Label::Persistence(p) => p.as_str(),
        }
    }

    /// ASCII key accepted on the command line
    pub fn key(&self) -> &'static str {
        match self {
            Label::Efficacy(e) => e.key(),
            Label::ClaimType(t) => t.key(),
            Label::Persistence(p) => p.key(),
        }
    }

    /// Category code; only efficacy labels carry one
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Label::Efficacy(e) => Some(e.code()),
            _ => None,
        }
    }

    /// Description; only efficacy labels carry one
    pub fn description(&self) -> Option<&'static str> {
        match self {
            Label::Efficacy(e) => Some(e.description()),
            _ => None,
        }
    }

    /// Parse a label within a dimension
    pub fn parse(dimension: Dimension, s: &str) -> Option<Self> {
        match dimension {
            Dimension::Efficacy => Efficacy::parse(s).map(Label::Efficacy),
            Dimension::ClaimType => ClaimType::parse(s).map(Label::ClaimType),
            Dimension::Persistence => Persistence::parse(s).map(Label::Persistence),
        }
    }

    /// Every label of a dimension, in declaration order
    pub fn all(dimension: Dimension) -> Vec<Label> {
        match dimension {
            Dimension::Efficacy => Efficacy::ALL.into_iter().map(Label::Efficacy).collect(),
            Dimension::ClaimType => ClaimType::ALL.into_iter().map(Label::ClaimType).collect(),
            Dimension::Persistence => {
                Persistence::ALL.into_iter().map(Label::Persistence).collect()
            }
        }
    }
}

impl From<Efficacy> for Label {
    fn from(e: Efficacy) -> Self {
        Label::Efficacy(e)
    }
}

impl From<ClaimType> for Label {
    fn from(t: ClaimType) -> Self {
        Label::ClaimType(t)
    }
}

impl From<Persistence> for Label {
    fn from(p: Persistence) -> Self {
        Label::Persistence(p)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Efficacy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ClaimType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Persistence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_efficacy_codes_are_unique() {
        let mut codes: Vec<&str> = Efficacy::ALL.iter().map(|e| e.code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), 27);
        assert_eq!(Efficacy::Other.code(), "A");
        assert_eq!(Efficacy::Moisturizing.code(), "11");
    }

    #[test]
    fn test_parse_by_name_key_and_code() {
        assert_eq!(Efficacy::parse("保湿"), Some(Efficacy::Moisturizing));
        assert_eq!(Efficacy::parse("moisturizing"), Some(Efficacy::Moisturizing));
        assert_eq!(Efficacy::parse("11"), Some(Efficacy::Moisturizing));
        assert_eq!(Efficacy::parse("a"), Some(Efficacy::Other));
        assert_eq!(ClaimType::parse("温和宣称"), Some(ClaimType::Mild));
        assert_eq!(Persistence::parse("durable"), Some(Persistence::Durable));
        assert_eq!(Efficacy::parse("unknown"), None);
    }

    #[test]
    fn test_label_parse_is_dimension_scoped() {
        assert_eq!(
            Label::parse(Dimension::Efficacy, "保湿"),
            Some(Label::Efficacy(Efficacy::Moisturizing))
        );
        assert_eq!(Label::parse(Dimension::ClaimType, "保湿"), None);
        assert_eq!(
            Label::parse(Dimension::Persistence, "持久").map(|l| l.dimension()),
            Some(Dimension::Persistence)
        );
    }

    #[test]
    fn test_label_serde_shape() {
        let label = Label::Efficacy(Efficacy::Moisturizing);
        let json = serde_json::to_string(&label).unwrap();
        assert_eq!(json, r#"{"dimension":"efficacy","value":"保湿"}"#);
        let back: Label = serde_json::from_str(&json).unwrap();
        assert_eq!(back, label);
    }

    #[test]
    fn test_all_counts() {
        assert_eq!(Label::all(Dimension::Efficacy).len(), 27);
        assert_eq!(Label::all(Dimension::ClaimType).len(), 7);
        assert_eq!(Label::all(Dimension::Persistence).len(), 2);
    }
}
