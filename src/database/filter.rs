use sqlx::{Postgres, QueryBuilder};

/// Whose view of the catalog a query serves.
///
/// Callers must state their intent explicitly: the public site can never see
/// draft rows, while admin screens see everything unless they narrow further.
/// An implicit "omit the filter and you get published-only" default is how
/// drafts leak, so there is no default here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    Public,
    Admin,
}

/// Optional narrowing criteria for project listings.
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    pub category: Option<String>,
    /// Case-insensitive substring match on location
    pub location: Option<String>,
    /// Prefix match on completion date, e.g. "2023"
    pub year: Option<String>,
    pub featured: Option<bool>,
    /// Honored for Audience::Admin only; Public is always pinned to true
    pub published: Option<bool>,
}

impl ProjectFilter {
    /// The effective published constraint after audience pinning.
    pub fn published_constraint(&self, audience: Audience) -> Option<bool> {
        match audience {
            Audience::Public => Some(true),
            Audience::Admin => self.published,
        }
    }

    /// Append WHERE conditions for this filter onto a query builder.
    /// The builder must already contain the SELECT ... FROM projects part.
    pub fn push_where(&self, audience: Audience, builder: &mut QueryBuilder<'_, Postgres>) {
        builder.push(" WHERE TRUE");

        if let Some(published) = self.published_constraint(audience) {
            builder.push(" AND published = ").push_bind(published);
        }

        if let Some(category) = &self.category {
            builder.push(" AND category = ").push_bind(category.clone());
        }

        if let Some(location) = &self.location {
            builder
                .push(" AND location ILIKE ")
                .push_bind(format!("%{}%", escape_like(location)))
                .push(" ESCAPE '\\'");
        }

        if let Some(year) = &self.year {
            builder
                .push(" AND completion_date LIKE ")
                .push_bind(format!("{}%", escape_like(year)))
                .push(" ESCAPE '\\'");
        }

        if let Some(featured) = self.featured {
            builder.push(" AND featured = ").push_bind(featured);
        }
    }
}

/// Escape LIKE metacharacters so user input matches literally.
fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sql_for(filter: &ProjectFilter, audience: Audience) -> String {
        let mut builder = QueryBuilder::new("SELECT * FROM projects");
        filter.push_where(audience, &mut builder);
        builder.sql().to_string()
    }

    #[test]
    fn public_audience_always_pins_published() {
        let filter = ProjectFilter::default();
        assert_eq!(filter.published_constraint(Audience::Public), Some(true));

        // Even an explicit request for drafts cannot widen the public view
        let filter = ProjectFilter {
            published: Some(false),
            ..Default::default()
        };
        assert_eq!(filter.published_constraint(Audience::Public), Some(true));
    }

    #[test]
    fn admin_audience_honors_explicit_published() {
        let all = ProjectFilter::default();
        assert_eq!(all.published_constraint(Audience::Admin), None);

        let drafts = ProjectFilter {
            published: Some(false),
            ..Default::default()
        };
        assert_eq!(drafts.published_constraint(Audience::Admin), Some(false));
    }

    #[test]
    fn empty_admin_filter_adds_no_conditions() {
        let sql = sql_for(&ProjectFilter::default(), Audience::Admin);
        assert_eq!(sql, "SELECT * FROM projects WHERE TRUE");
    }

    #[test]
    fn filter_conditions_appear_in_sql() {
        let filter = ProjectFilter {
            category: Some("Residential".to_string()),
            location: Some("Lagos".to_string()),
            year: Some("2023".to_string()),
            featured: Some(true),
            published: None,
        };
        let sql = sql_for(&filter, Audience::Public);
        assert!(sql.contains("published = "));
        assert!(sql.contains("category = "));
        assert!(sql.contains("location ILIKE "));
        assert!(sql.contains("completion_date LIKE "));
        assert!(sql.contains("featured = "));
    }

    #[test]
    fn like_metacharacters_are_escaped() {
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
        assert_eq!(escape_like("plain"), "plain");
    }
}
