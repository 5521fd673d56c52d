//! Built-in keyword table
//!
//! Immutable and versioned. Within a row the keywords are alternatives; rows
//! are evaluated in declaration order, which for persistence is also the
//! priority order (immediate cues before durable cues).

use claimlens_domain::{ClaimType, Efficacy, Label, Persistence};

/// Version tag of the base table, also written into exported snapshots
pub const BASE_VERSION: &str = "2.0";

/// Efficacy rows
pub static EFFICACY: &[(&[&str], Efficacy)] = &[
    (
        &["保湿", "滋润", "水润", "锁水", "补水", "保水", "润泽", "湿润", "水分", "水嫩", "玻尿酸", "透明质酸", "甘油", "角鲨烷"],
        Efficacy::Moisturizing,
    ),
    (
        &["美白", "祛斑", "亮白", "透亮", "去斑", "淡斑", "提亮", "均匀肤色", "白皙", "净白", "烟酰胺", "熊果苷", "VC"],
        Efficacy::Whitening,
    ),
    (
        &["抗皱", "去皱", "除皱", "皱纹", "纹路", "细纹", "表情纹", "法令纹", "鱼尾纹", "抬头纹", "视黄醇", "肽"],
        Efficacy::AntiWrinkle,
    ),
    (
        &["紧致", "紧实", "弹性", "胶原", "胶原蛋白", "提拉", "lifting", "firmness", "弹力", "塑形"],
        Efficacy::Firming,
    ),
    (
        &["滋养", "润养", "养护", "深层滋养", "营养", "补养", "润泽", "浸润", "渗透", "精华"],
        Efficacy::Nourishing,
    ),
    (
        &["修护", "修复", "屏障", "强韧", "修复力", "愈合", "重建", "再生", "修复因子", "神经酰胺"],
        Efficacy::Repair,
    ),
    (
        &["清洁", "洗净", "去污", "清洗", "冲洗", "洁净", "深层清洁", "彻底清洁", "温和清洁", "泡沫"],
        Efficacy::Cleansing,
    ),
    (
        &["控油", "吸油", "去油", "油腻", "油光", "T区", "出油", "皮脂", "哑光", "清爽", "水杨酸"],
        Efficacy::OilControl,
    ),
    (
        &["舒缓", "缓解", "减轻", "改善刺激", "温和", "安抚", "镇静", "敏感", "刺激", "积雪草", "洋甘菊"],
        Efficacy::Soothing,
    ),
    (
        &["防晒", "隔离", "防护", "阻挡", "紫外线", "UV", "SPF", "PA", "日晒", "阳光", "氧化锌", "二氧化钛"],
        Efficacy::SunProtection,
    ),
    (
        &["护发", "柔顺", "丝滑", "光泽", "shine", "顺滑", "柔软", "梳理", "防静电", "发膜", "护发素", "蓬松"],
        Efficacy::HairCare,
    ),
    (
        &["祛痘", "痘痘", "粉刺", "青春痘", "暗疮", "痤疮", "黑头", "白头", "闭口", "茶树", "水杨酸"],
        Efficacy::AntiAcne,
    ),
    (
        &["染发", "着色", "上色", "显色", "彩色", "颜色", "发色", "调色", "漂色", "染膏"],
        Efficacy::HairDye,
    ),
    (
        &["烫发", "卷发", "直发", "弯曲", "拉直", "造型", "定型", "塑型", "波浪", "烫发水"],
        Efficacy::Perm,
    ),
    (
        &["卸妆", "卸除", "卸掉", "去妆", "卸妆水", "卸妆油", "卸妆乳", "卸妆膏", "清除彩妆"],
        Efficacy::MakeupRemoval,
    ),
    (
        &["美容", "修饰", "妆容", "彩妆", "化妆", "遮瑕", "遮盖", "掩盖", "美化", "底妆"],
        Efficacy::Beautifying,
    ),
    (
        &["香", "香味", "香气", "留香", "体香", "香调", "香水", "芳香", "香氛", "香精"],
        Efficacy::Fragrance,
    ),
    (
        &["除臭", "去味", "去异味", "抑制异味", "防臭", "消臭", "止汗", "腋下", "体味"],
        Efficacy::Deodorizing,
    ),
    (
        &["去角质", "角质", "exfoliate", "磨砂", "剥脱", "脱皮", "死皮", "果酸", "酵素"],
        Efficacy::Exfoliating,
    ),
    (
        &["爽身", "干爽", "清凉", "凉爽", "清爽", "舒适", "透气", "凉感", "薄荷"],
        Efficacy::Refreshing,
    ),
    (
        &["防脱", "脱发", "掉发", "固发", "育发", "生发", "发根", "发量", "浓密", "生姜"],
        Efficacy::AntiHairLoss,
    ),
    (
        &["防断发", "断发", "分叉", "韧性", "强韧", "坚韧", "发丝强度", "蛋白质"],
        Efficacy::AntiBreakage,
    ),
    (
        &["去屑", "头屑", "dandruff", "头皮屑", "鳞屑", "片状", "白屑", "吡啶硫酮锌"],
        Efficacy::AntiDandruff,
    ),
    (
        &["发色护理", "护色", "锁色", "保色", "发色", "色彩", "颜色保持", "护色素"],
        Efficacy::HairColorCare,
    ),
    (
        &["脱毛", "除毛", "去毛", "hair removal", "腿毛", "腋毛", "体毛", "脱毛膏"],
        Efficacy::HairRemoval,
    ),
    (
        &["剃须", "剃毛", "shaving", "胡须", "胡子", "刮胡", "剃刀", "剃须膏"],
        Efficacy::ShavingAid,
    ),
];

/// Claim-type rows
///
/// Two keywords of the after-use row (`肌肤.*了`, `让.*肌`) are regex
/// fragments. Matching treats them literally; only the suggestion filter
/// compiles them.
pub static CLAIM_TYPE: &[(&[&str], ClaimType)] = &[
    (
        &["温和", "无刺激", "不刺激", "亲肤", "gentle", "mild", "温柔", "柔和", "低刺激", "敏感肌", "0刺激"],
        ClaimType::Mild,
    ),
    (
        &["成分", "原料", "ingredient", "含有", "添加", "富含", "萃取", "extract", "精华", "配方", "活性物"],
        ClaimType::Ingredient,
    ),
    (
        &["24小时", "12小时", "8小时", "持续", "%", "倍", "次", "程度", "测试", "临床", "数据", "调查", "数字"],
        ClaimType::Quantified,
    ),
    (
        &["喜欢", "喜好", "满意", "推荐", "好评", "评价", "好用", "实用", "有效", "回购", "点赞"],
        ClaimType::Preference,
    ),
    (
        &["质地", "texture", "丝滑", "绵密", "轻盈", "粘腻", "厚重", "轻薄", "浓稠", "延展性", "触感"],
        ClaimType::Texture,
    ),
    (
        &["感觉", "感受到", "体验", "使用时", "抹开", "涂抹", "上脸", "第一感觉", "瞬间", "触碰"],
        ClaimType::UsageFeel,
    ),
    (
        &["使用后", "用完", "涂完", "肌肤.*了", "让.*肌", "皮肤变得", "坚持使用", "长期使用", "效果"],
        ClaimType::AfterUse,
    ),
];

/// Persistence rows, in priority order
pub static PERSISTENCE: &[(&[&str], Persistence)] = &[
    (
        &["即刻", "立即", "瞬间", "马上", "快速", "即时", "当下", "现在", "立竿见影", "秒", "瞬时", "急速"],
        Persistence::Immediate,
    ),
    (
        &[
            "持久", "长效", "持续", "24小时", "12小时", "8小时", "48小时", "72小时", "长时间", "长期", "逐渐",
            "慢慢", "天", "日", "周", "月", "年", "小时", "分钟", "持续性", "耐久", "恒久", "7天", "3天", "5天",
            "10天", "30天", "一周", "一月", "全天", "整夜",
        ],
        Persistence::Durable,
    ),
];

/// Every base row as (label, keywords), dimension by dimension
pub fn rows() -> impl Iterator<Item = (Label, &'static [&'static str])> {
    EFFICACY
        .iter()
        .map(|(kw, e)| (Label::Efficacy(*e), *kw))
        .chain(CLAIM_TYPE.iter().map(|(kw, t)| (Label::ClaimType(*t), *kw)))
        .chain(PERSISTENCE.iter().map(|(kw, p)| (Label::Persistence(*p), *kw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use claimlens_domain::Dimension;

    #[test]
    fn test_every_regulated_efficacy_has_a_row() {
        for e in Efficacy::ALL {
            if e == Efficacy::Other {
                assert!(EFFICACY.iter().all(|(_, l)| *l != e), "catch-all has no keywords");
            } else {
                assert!(EFFICACY.iter().any(|(_, l)| *l == e), "missing row for {:?}", e);
            }
        }
    }

    #[test]
    fn test_every_claim_type_has_a_row() {
        for t in ClaimType::ALL {
            assert!(CLAIM_TYPE.iter().any(|(_, l)| *l == t));
        }
    }

    #[test]
    fn test_immediate_cues_precede_durable_cues() {
        assert_eq!(PERSISTENCE[0].1, Persistence::Immediate);
        assert_eq!(PERSISTENCE[1].1, Persistence::Durable);
    }

    #[test]
    fn test_rows_cover_all_dimensions() {
        let dims: Vec<Dimension> = rows().map(|(l, _)| l.dimension()).collect();
        assert_eq!(dims.len(), EFFICACY.len() + CLAIM_TYPE.len() + PERSISTENCE.len());
        assert!(rows().all(|(_, kws)| kws.iter().all(|k| !k.is_empty())));
    }
}
