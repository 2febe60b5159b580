#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use sea_orm::{DatabaseBackend, JoinType, MockDatabase, MockExecResult, QueryTrait, Value};

    use quill_core::domain::{Category, PostOrder, PostQuery, Visibility};
    use quill_core::error::RepoError;
    use quill_core::ports::{BaseRepository, CategoryRepository, PostRepository, TagRepository};

    use crate::database::entity::{category, post, post_tag, tag, user};
    use crate::database::post_repo::{PostgresPostRepository, bump_views, compose, escape_like};
    use crate::database::postgres_repo::{
        PostgresCategoryRepository, PostgresTagRepository, categories_with_counts,
        tags_with_counts,
    };

    fn post_sql(query: &PostQuery) -> String {
        compose(query).build(DatabaseBackend::Postgres).to_string()
    }

    #[test]
    fn test_public_query_filters_to_published() {
        let sql = post_sql(&PostQuery::public());

        assert!(sql.contains(r#""posts"."status" = 'published'"#));
        assert!(sql.contains(r#""posts"."published_at" IS NOT NULL"#));
    }

    #[test]
    fn test_management_query_sees_every_status() {
        let sql = post_sql(&PostQuery::management());

        // No filters at all: the statement must not grow a WHERE clause.
        assert!(!sql.contains("WHERE"));
        assert!(!sql.contains(r#""posts"."status" = 'published'"#));
    }

    #[test]
    fn test_search_matches_title_excerpt_and_content() {
        let query = PostQuery {
            search: Some("rust".to_owned()),
            ..PostQuery::public()
        };
        let sql = post_sql(&query);

        assert_eq!(sql.matches("ILIKE").count(), 3);
        assert!(sql.contains(r#""posts"."title" ILIKE '%rust%'"#));
        assert!(sql.contains(r#""posts"."excerpt" ILIKE '%rust%'"#));
        assert!(sql.contains(r#""posts"."content" ILIKE '%rust%'"#));
    }

    #[test]
    fn test_search_escapes_like_wildcards() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("plain"), "plain");
    }

    #[test]
    fn test_category_filter_joins_on_slug() {
        let query = PostQuery {
            category_slug: Some("rust".to_owned()),
            ..PostQuery::public()
        };
        let sql = post_sql(&query);

        assert!(sql.contains(r#"INNER JOIN "categories""#));
        assert!(sql.contains(r#""categories"."slug" = 'rust'"#));
    }

    #[test]
    fn test_tag_filter_joins_through_junction() {
        let query = PostQuery {
            tag_slug: Some("tokio".to_owned()),
            ..PostQuery::public()
        };
        let sql = post_sql(&query);

        assert!(sql.contains(r#"INNER JOIN "post_tag""#));
        assert!(sql.contains(r#"INNER JOIN "tags""#));
        assert!(sql.contains(r#""tags"."slug" = 'tokio'"#));
    }

    #[test]
    fn test_popular_order_breaks_ties_by_id() {
        let sql = post_sql(&PostQuery {
            order: PostOrder::Popular,
            ..PostQuery::public()
        });

        assert!(sql.contains(r#"ORDER BY "posts"."views_count" DESC, "posts"."id" ASC"#));
    }

    #[test]
    fn test_recent_order_uses_publication_time() {
        let sql = post_sql(&PostQuery {
            order: PostOrder::Recent,
            ..PostQuery::public()
        });

        assert!(sql.contains(r#"ORDER BY "posts"."published_at" DESC, "posts"."id" ASC"#));
    }

    #[test]
    fn test_category_counts_keep_empty_categories() {
        let sql = categories_with_counts(JoinType::LeftJoin)
            .build(DatabaseBackend::Postgres)
            .to_string();

        assert!(sql.contains(r#"LEFT JOIN "posts""#));
        assert!(sql.contains(r#""posts"."status" = 'published'"#));
        assert!(sql.contains(r#""posts"."published_at" IS NOT NULL"#));
        assert!(sql.contains(r#"COUNT("posts"."id") AS "posts_count""#));
        assert!(sql.contains(r#"GROUP BY "categories"."id""#));
    }

    #[test]
    fn test_tag_counts_join_through_junction() {
        let sql = tags_with_counts(JoinType::InnerJoin)
            .build(DatabaseBackend::Postgres)
            .to_string();

        assert!(sql.contains(r#"INNER JOIN "post_tag""#));
        assert!(sql.contains(r#"INNER JOIN "posts""#));
        assert!(sql.contains(r#""posts"."status" = 'published'"#));
        assert!(sql.contains(r#"GROUP BY "tags"."id""#));
    }

    #[tokio::test]
    async fn test_find_category_by_id() {
        let now = chrono::Utc::now();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![category::Model {
                id: 1,
                name: "Rust".to_owned(),
                slug: "rust".to_owned(),
                description: None,
                color: "#6366f1".to_owned(),
                created_at: now.into(),
                updated_at: now.into(),
            }]])
            .into_connection();

        let repo = PostgresCategoryRepository::new(db);

        let result: Option<Category> = repo.find_by_id(1).await.unwrap();

        assert!(result.is_some());
        let found = result.unwrap();
        assert_eq!(found.name, "Rust");
        assert_eq!(found.slug, "rust");
    }

    #[tokio::test]
    async fn test_find_by_slug_assembles_relations() {
        let now = chrono::Utc::now();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post::Model {
                id: 7,
                title: "Hello World".to_owned(),
                slug: "hello-world".to_owned(),
                excerpt: "An introduction.".to_owned(),
                content: "Body text.".to_owned(),
                featured_image: None,
                status: "published".to_owned(),
                views_count: 9,
                published_at: Some(now.into()),
                user_id: 3,
                category_id: 2,
                created_at: now.into(),
                updated_at: now.into(),
            }]])
            .append_query_results(vec![vec![user::Model {
                id: 3,
                name: "Ada".to_owned(),
                email: "ada@example.com".to_owned(),
                created_at: now.into(),
                updated_at: now.into(),
            }]])
            .append_query_results(vec![vec![category::Model {
                id: 2,
                name: "Rust".to_owned(),
                slug: "rust".to_owned(),
                description: None,
                color: "#6366f1".to_owned(),
                created_at: now.into(),
                updated_at: now.into(),
            }]])
            .append_query_results(vec![vec![post_tag::Model {
                post_id: 7,
                tag_id: 5,
            }]])
            .append_query_results(vec![vec![tag::Model {
                id: 5,
                name: "Tokio".to_owned(),
                slug: "tokio".to_owned(),
                color: "#10b981".to_owned(),
                created_at: now.into(),
                updated_at: now.into(),
            }]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let record = repo
            .find_by_slug("hello-world", Visibility::Public)
            .await
            .unwrap()
            .expect("post should be found");

        assert_eq!(record.post.slug, "hello-world");
        assert_eq!(record.post.views_count, 9);
        assert_eq!(record.author.name, "Ada");
        assert_eq!(record.category.slug, "rust");
        assert_eq!(record.tags.len(), 1);
        assert_eq!(record.tags[0].slug, "tokio");
    }

    #[tokio::test]
    async fn test_find_by_slug_missing_returns_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<post::Model>::new()])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result = repo.find_by_slug("ghost", Visibility::Public).await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_increment_views_bumps_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        assert!(repo.increment_views(7).await.is_ok());
    }

    #[tokio::test]
    async fn test_increment_views_missing_post() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result = repo.increment_views(404).await;

        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    /// Concurrent detail views must not lose counts, so the bump has to be
    /// one self-referential UPDATE rather than a read-modify-write.
    #[test]
    fn test_increment_views_is_a_single_atomic_update() {
        let sql = bump_views(7).build(DatabaseBackend::Postgres).to_string();

        assert!(sql.starts_with(r#"UPDATE "posts""#));
        assert!(sql.contains(r#""views_count" = "views_count" + 1"#));
        assert!(sql.contains(r#""id" = 7"#));
    }

    #[tokio::test]
    async fn test_top_categories_map_count_rows() {
        let now = chrono::Utc::now().fixed_offset();
        let row = BTreeMap::<&str, Value>::from([
            ("id", 2i64.into()),
            ("name", "Rust".into()),
            ("slug", "rust".into()),
            ("description", Value::String(None)),
            ("color", "#6366f1".into()),
            ("created_at", now.into()),
            ("updated_at", now.into()),
            ("posts_count", 4i64.into()),
        ]);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![row]])
            .into_connection();

        let repo = PostgresCategoryRepository::new(db);

        let top = repo.top_by_visible_posts(8).await.unwrap();

        assert_eq!(top.len(), 1);
        assert_eq!(top[0].0.slug, "rust");
        assert_eq!(top[0].1, 4);
    }

    #[tokio::test]
    async fn test_count_by_ids_skips_query_for_empty_input() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let repo = PostgresTagRepository::new(db);

        assert_eq!(repo.count_by_ids(&[]).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_find_page_reports_totals() {
        let now = chrono::Utc::now();
        let count_row = BTreeMap::<&str, Value>::from([("num_items", 12i64.into())]);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![count_row]])
            .append_query_results(vec![vec![post::Model {
                id: 11,
                title: "Paged".to_owned(),
                slug: "paged".to_owned(),
                excerpt: "Second page.".to_owned(),
                content: "Body.".to_owned(),
                featured_image: None,
                status: "published".to_owned(),
                views_count: 0,
                published_at: Some(now.into()),
                user_id: 3,
                category_id: 2,
                created_at: now.into(),
                updated_at: now.into(),
            }]])
            .append_query_results(vec![vec![user::Model {
                id: 3,
                name: "Ada".to_owned(),
                email: "ada@example.com".to_owned(),
                created_at: now.into(),
                updated_at: now.into(),
            }]])
            .append_query_results(vec![vec![category::Model {
                id: 2,
                name: "Rust".to_owned(),
                slug: "rust".to_owned(),
                description: None,
                color: "#6366f1".to_owned(),
                created_at: now.into(),
                updated_at: now.into(),
            }]])
            .append_query_results(vec![Vec::<post_tag::Model>::new()])
            .append_query_results(vec![Vec::<tag::Model>::new()])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let query = PostQuery {
            page: 2,
            ..PostQuery::public()
        };
        let page = repo.find_page(&query).await.unwrap();

        assert_eq!(page.total, 12);
        assert_eq!(page.current_page, 2);
        assert_eq!(page.per_page, 10);
        assert_eq!(page.last_page(), 2);
        assert_eq!(page.items.len(), 1);
        assert!(page.items[0].tags.is_empty());
    }
}
