// slug.rs - 由标题生成 URL 安全的 slug
//! 纯函数：同一个标题总是得到同一个 slug

use deunicode::deunicode;

/// 直接删除、不产生分隔符的字符
const QUOTES: [char; 5] = ['\'', '"', '\u{2018}', '\u{2019}', '`'];

/// 生成 slug，输出只含 `[a-z0-9-]`
///
/// 规则：
/// 1. 引号直接删除（"It's" -> "its"）
/// 2. 音译为 ASCII（"Café" -> "cafe"，"Straße" -> "strasse"，孟加拉文按读音转写）
/// 3. 字母数字转小写保留
/// 4. 其他字符的连续片段合并成一个 `-`，首尾不留 `-`
pub fn slugify(title: &str) -> String {
    let ascii = deunicode(&title.replace(QUOTES, ""));
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_separator = false;

    // 音译结果里也可能出现引号（如西里尔字母的软音符号）
    for c in ascii.chars().filter(|c| !QUOTES.contains(c)) {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Chapter 1"), "chapter-1");
        assert_eq!(slugify("Physics Chapter 1!"), "physics-chapter-1");
        assert_eq!(slugify("  Multiple   Spaces  "), "multiple-spaces");
        assert_eq!(slugify("special!@#chars"), "special-chars");
        assert_eq!(slugify("snake_case_title"), "snake-case-title");
    }

    #[test]
    fn test_slugify_is_deterministic() {
        let title = "Physics Chapter 1!";
        assert_eq!(slugify(title), slugify(title));
        assert_eq!(slugify(&slugify(title)), slugify(title));
    }

    #[test]
    fn test_different_titles_can_collide() {
        assert_eq!(slugify("Chapter 1"), slugify("chapter-1"));
        assert_eq!(slugify("Chapter  1?"), slugify("CHAPTER 1"));
    }

    #[test]
    fn test_slugify_quotes_and_accents() {
        assert_eq!(slugify("It's Newton's Law"), "its-newtons-law");
        assert_eq!(slugify("Newton\u{2019}s \u{2018}Laws\u{2019}"), "newtons-laws");
        assert_eq!(slugify("Café Déjà Vu"), "cafe-deja-vu");
    }

    #[test]
    fn test_slugify_transliterates_to_ascii() {
        assert_eq!(slugify("Straße"), "strasse");
        assert_eq!(slugify("Æther"), "aether");

        let slug = slugify("বাংলা ব্যাকরণ");
        assert!(!slug.is_empty());
        assert!(slug.contains('-'));
        assert!(!slug.starts_with('-') && !slug.ends_with('-'));
        assert!(
            slug.chars()
                .all(|c| c == '-' || c.is_ascii_lowercase() || c.is_ascii_digit())
        );
    }

    #[test]
    fn test_slugify_punctuation_only_is_empty() {
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify("   "), "");
    }
}
