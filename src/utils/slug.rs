/// 由标题生成 URL slug：小写 ASCII 字母数字，其余字符折叠为单个连字符
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;
    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else if ch == '\'' || ch == '’' {
            // 撇号直接去掉，不产生分隔
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// 在候选 slug 已被占用时追加 `-N` 后缀，直到 `taken` 返回 false
pub async fn unique_slug<F, Fut, E>(base: &str, mut taken: F) -> Result<String, E>
where
    F: FnMut(String) -> Fut,
    Fut: std::future::Future<Output = Result<bool, E>>,
{
    let base = if base.is_empty() { "item".to_string() } else { base.to_string() };
    let mut candidate = base.clone();
    let mut counter = 1;
    while taken(candidate.clone()).await? {
        candidate = format!("{base}-{counter}");
        counter += 1;
    }
    Ok(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Pentas Seni 2024!"), "pentas-seni-2024");
        assert_eq!(slugify("  Drs. Ahmad  Fauzi, M.Pd "), "drs-ahmad-fauzi-m-pd");
        assert_eq!(slugify("Kid's Day"), "kids-day");
        assert_eq!(slugify("???"), "");
    }

    #[tokio::test]
    async fn test_unique_slug_appends_counter() {
        let existing = ["berita", "berita-1"];
        let slug = unique_slug("berita", |candidate| async move {
            Ok::<_, ()>(existing.contains(&candidate.as_str()))
        })
        .await
        .unwrap();
        assert_eq!(slug, "berita-2");
    }
}
