use sea_orm::ColumnTrait;
use sea_orm::sea_query::{Expr, ExprTrait, Func, LikeExpr};

/// 转义 LIKE 模式中的通配符
pub fn escape_like_pattern(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.trim().chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// 非空白的搜索关键词
pub fn search_term(search: Option<&str>) -> Option<String> {
    search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(escape_like_pattern)
}

/// 不区分大小写的包含匹配，term 需已转义
pub fn contains_ci<C: ColumnTrait>(column: C, term: &str) -> Expr {
    Func::lower(Expr::col(column))
        .like(LikeExpr::new(format!("%{}%", term.to_lowercase())).escape('\\'))
}

/// 不区分大小写的相等匹配
pub fn equals_ci<C: ColumnTrait>(column: C, value: &str) -> Expr {
    Func::lower(Expr::col(column)).eq(value.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_pattern() {
        assert_eq!(escape_like_pattern("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like_pattern("  budi "), "budi");
    }

    #[test]
    fn test_search_term() {
        assert_eq!(search_term(Some("   ")), None);
        assert_eq!(search_term(None), None);
        assert_eq!(search_term(Some(" 7A ")).as_deref(), Some("7A"));
    }
}
