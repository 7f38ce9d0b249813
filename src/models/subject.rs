use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// 科目枚举
///
/// 每个科目对应共享试算表中的一个工作表。
///
/// 序列化为工作表名称（如 "英文"），与文本报告一致。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subject {
    /// 国文
    Chinese,
    /// 英文
    English,
    /// 数学
    Math,
    /// 社会
    Social,
    /// 自然
    Science,
}

impl Subject {
    /// 默认分析的全部科目（按显示顺序）
    pub const ALL: [Subject; 5] = [
        Subject::Chinese,
        Subject::English,
        Subject::Math,
        Subject::Social,
        Subject::Science,
    ];

    /// 对应的工作表名称
    pub fn sheet_name(self) -> &'static str {
        match self {
            Subject::Chinese => "國文",
            Subject::English => "英文",
            Subject::Math => "數學",
            Subject::Social => "社會",
            Subject::Science => "自然",
        }
    }

    /// 尝试从字符串解析科目（精确匹配，繁简体均可）
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "國文" | "国文" | "國" | "国" => Some(Subject::Chinese),
            "英文" | "英" => Some(Subject::English),
            "數學" | "数学" | "數" | "数" => Some(Subject::Math),
            "社會" | "社会" | "社" => Some(Subject::Social),
            "自然" | "自" => Some(Subject::Science),
            _ => None,
        }
    }

    /// 智能查找科目（支持英文名和模糊匹配）
    pub fn find(s: &str) -> Option<Self> {
        if let Some(subject) = Self::from_str(s) {
            return Some(subject);
        }

        let s_lower = s.trim().to_lowercase();
        match s_lower.as_str() {
            "chinese" => return Some(Subject::Chinese),
            "english" => return Some(Subject::English),
            "math" | "maths" => return Some(Subject::Math),
            "social" | "social studies" => return Some(Subject::Social),
            "science" | "nature" => return Some(Subject::Science),
            _ => {}
        }

        Self::ALL.into_iter().find(|subject| {
            let name = subject.sheet_name();
            s_lower.contains(name) || name.contains(s_lower.as_str()) && !s_lower.is_empty()
        })
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.sheet_name())
    }
}

impl Serialize for Subject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.sheet_name())
    }
}

impl<'de> Deserialize<'de> for Subject {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Subject::find(&name)
            .ok_or_else(|| de::Error::custom(format!("无法识别的科目: {}", name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_variants() {
        assert_eq!(Subject::find("国文"), Some(Subject::Chinese));
        assert_eq!(Subject::find("數學"), Some(Subject::Math));
        assert_eq!(Subject::find("English"), Some(Subject::English));
        assert_eq!(Subject::find("自然科"), Some(Subject::Science));
        assert_eq!(Subject::find("体育"), None);
        assert_eq!(Subject::find(""), None);
    }

    #[test]
    fn test_serialize_as_sheet_name() {
        assert_eq!(serde_json::to_string(&Subject::English).unwrap(), "\"英文\"");
        let parsed: Subject = serde_json::from_str("\"數學\"").unwrap();
        assert_eq!(parsed, Subject::Math);
        assert!(serde_json::from_str::<Subject>("\"體育\"").is_err());
    }
}
