use serde::Deserialize;

const DEFAULT_LIMIT: i64 = 20;
const MAX_LIMIT: i64 = 100;

/// Common `?limit=&offset=` query parameters for list endpoints.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PageParams {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply() {
        let page = PageParams::default();
        assert_eq!(page.limit(), 20);
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn limit_is_clamped() {
        let page = PageParams {
            limit: Some(10_000),
            offset: Some(-5),
        };
        assert_eq!(page.limit(), 100);
        assert_eq!(page.offset(), 0);

        let page = PageParams {
            limit: Some(0),
            offset: None,
        };
        assert_eq!(page.limit(), 1);
    }
}
