//! 同意チェック（ConsentGate）
//!
//! 必須項目が全てtrueのときだけ送信を許可する。

use std::collections::BTreeMap;

/// 同意項目
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConsentItem {
    /// 肖像権・著作権を侵害しない
    Rights,
    /// 解析結果は参考用であり法的証拠ではない
    Disclaimer,
    /// 生成画像を誹謗・犯罪・虚偽情報に使わない
    Ethics,
}

impl ConsentItem {
    pub fn key(&self) -> &'static str {
        match self {
            ConsentItem::Rights => "rights",
            ConsentItem::Disclaimer => "disclaimer",
            ConsentItem::Ethics => "ethics",
        }
    }

    /// チェックボックスの文言
    pub fn statement(&self) -> &'static str {
        match self {
            ConsentItem::Rights => {
                "This image does not infringe anyone's portrait rights or copyright."
            }
            ConsentItem::Disclaimer => {
                "I understand the AI analysis is for reference only and cannot be used as legal evidence."
            }
            ConsentItem::Ethics => {
                "I will not use AI images to defame others, commit crimes, or spread disinformation."
            }
        }
    }
}

/// 同意状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsentGate {
    flags: BTreeMap<ConsentItem, bool>,
}

impl ConsentGate {
    /// 必須項目を全て未チェックで作成
    pub fn new(required: &[ConsentItem]) -> Self {
        Self {
            flags: required.iter().map(|item| (*item, false)).collect(),
        }
    }

    /// 必須でない項目は無視してfalseを返す
    pub fn set(&mut self, item: ConsentItem, checked: bool) -> bool {
        match self.flags.get_mut(&item) {
            Some(flag) => {
                *flag = checked;
                true
            }
            None => false,
        }
    }

    pub fn toggle(&mut self, item: ConsentItem) {
        if let Some(flag) = self.flags.get_mut(&item) {
            *flag = !*flag;
        }
    }

    pub fn is_checked(&self, item: ConsentItem) -> bool {
        self.flags.get(&item).copied().unwrap_or(false)
    }

    pub fn all_consented(&self) -> bool {
        self.flags.values().all(|checked| *checked)
    }

    pub fn items(&self) -> impl Iterator<Item = (ConsentItem, bool)> + '_ {
        self.flags.iter().map(|(item, checked)| (*item, *checked))
    }

    pub fn required(&self) -> impl Iterator<Item = ConsentItem> + '_ {
        self.flags.keys().copied()
    }
}
