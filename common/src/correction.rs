//! タイトル補正表
//!
//! ファイル名の接頭辞（最初の `_` より前）を残し、`_` 以降の区間の先頭を補正表に従って置換する。
//! 表の順で最初に前方一致したエントリを採用する。

use crate::naming::split_prefix;

/// 補正表の1行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Correction {
    pub present: String,
    pub correct: String,
}

/// 補正表（表の順序を保持）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorrectionTable {
    entries: Vec<Correction>,
}

impl CorrectionTable {
    /// 行を追加
    ///
    /// 同じ現タイトルが再登場した場合は位置を保ったまま正タイトルを上書きする。
    /// 現タイトルが空の行は無視する（全ファイルに一致してしまうため）。
    pub fn insert(&mut self, present: &str, correct: &str) {
        let present = present.trim();
        let correct = correct.trim();
        if present.is_empty() {
            return;
        }

        match self.entries.iter_mut().find(|e| e.present == present) {
            Some(existing) => existing.correct = correct.to_string(),
            None => self.entries.push(Correction {
                present: present.to_string(),
                correct: correct.to_string(),
            }),
        }
    }

    pub fn entries(&self) -> &[Correction] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 補正後のファイル名を返す（該当なしは `None`）
    pub fn corrected_file_name(&self, file_name: &str) -> Option<String> {
        let (prefix, rest) = split_prefix(file_name)?;
        if rest.is_empty() {
            return None;
        }

        let segment = format!("_{}", rest);
        let entry = self.entries.iter().find(|e| segment.starts_with(&e.present))?;
        let updated = format!("{}{}", entry.correct, &segment[entry.present.len()..]);

        Some(format!("{}{}", prefix, updated))
    }
}

impl<P: AsRef<str>, C: AsRef<str>> FromIterator<(P, C)> for CorrectionTable {
    fn from_iter<I: IntoIterator<Item = (P, C)>>(iter: I) -> Self {
        let mut table = CorrectionTable::default();
        for (present, correct) in iter {
            table.insert(present.as_ref(), correct.as_ref());
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rename_keeps_prefix() {
        let table: CorrectionTable = [("_oldname", "_newname")].into_iter().collect();
        assert_eq!(
            table.corrected_file_name("004_oldname.wav"),
            Some("004_newname.wav".to_string())
        );
    }

    #[test]
    fn test_no_match_returns_none() {
        let table: CorrectionTable = [("_oldname", "_newname")].into_iter().collect();
        assert_eq!(table.corrected_file_name("004_other.wav"), None);
        assert_eq!(table.corrected_file_name("nounderscore.wav"), None);
        assert_eq!(table.corrected_file_name("004_"), None);
    }

    #[test]
    fn test_first_entry_in_table_order_wins() {
        let table: CorrectionTable = [("_ann", "_ANN"), ("_anna", "_ANNA")].into_iter().collect();
        assert_eq!(
            table.corrected_file_name("1.1_anna.wav"),
            Some("1.1_ANNa.wav".to_string())
        );
    }

    #[test]
    fn test_duplicate_present_keeps_position_takes_last_value() {
        let table: CorrectionTable = [("_a", "_x"), ("_b", "_y"), ("_a", "_z")].into_iter().collect();
        assert_eq!(table.len(), 2);
        assert_eq!(table.entries()[0].correct, "_z");
    }

    #[test]
    fn test_blank_present_ignored() {
        let table: CorrectionTable = [("  ", "_x"), (" _old ", " _new ")].into_iter().collect();
        assert_eq!(table.len(), 1);
        assert_eq!(table.corrected_file_name("7_old.mp3"), Some("7_new.mp3".to_string()));
    }
}
