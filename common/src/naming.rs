//! ファイル名の正規化
//!
//! 参照名・実ファイル名はどちらも「最初の `_` 以降・拡張子なし・先頭の `_` を1つ除去」
//! の形で比較する。`003_two.wav` と参照 `two` / `_two` はすべて `two` になる。

/// 拡張子を除去する（先頭のドットは拡張子とみなさない）
pub fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) if name[..idx].chars().any(|c| c != '.') => &name[..idx],
        _ => name,
    }
}

/// 実ファイル名から比較用ベース名を取り出す
///
/// `_` を含まないファイル名は対象外として `None` を返す。
pub fn observed_base(file_name: &str) -> Option<String> {
    let idx = file_name.find('_')?;
    let tail = strip_extension(&file_name[idx..]);
    Some(tail.strip_prefix('_').unwrap_or(tail).to_string())
}

/// 参照リストの1行を比較用ベース名に正規化する
pub fn reference_base(entry: &str) -> String {
    let stem = strip_extension(entry.trim());
    stem.strip_prefix('_').unwrap_or(stem).to_string()
}

/// 最初の `_` で接頭辞と残りに分ける（`_` は含まない）
pub fn split_prefix(file_name: &str) -> Option<(&str, &str)> {
    file_name.split_once('_')
}
