use anyhow::Result;
use sqlx::{Postgres, QueryBuilder};
use tracing::info;

use crate::database_ops::db::Db;

/// One product ready to be written, with its category still by name; the
/// category row is looked up or created at insert time.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRow {
    /// Source `Product_ID`; `None` lets the sequence assign one.
    pub id: Option<i64>,
    pub name: String,
    pub price: f64,
    pub image_url: String,
    pub on_main: bool,
    pub category: String,
}

/// Filters accepted by the summary query. Bounds are inclusive, the category
/// match is exact.
#[derive(Debug, Default, Clone)]
pub struct SummaryFilter {
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

/// Aggregate view over the stored catalog. Zero matching rows reports 0.0
/// prices, never nulls; `categories` always covers the whole store.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSummary {
    pub total: i64,
    pub avg_price: f64,
    pub min_price: f64,
    pub max_price: f64,
    pub categories: Vec<String>,
    pub main_image: Option<String>,
}

/// Deletes every product and category, committed before repopulation starts.
/// A reader between this commit and the insert commit sees an empty store;
/// that window is accepted.
pub async fn clear_catalog(db: &Db) -> Result<()> {
    let mut tx = db.pool.begin().await?;
    sqlx::query("DELETE FROM products").execute(&mut *tx).await?;
    sqlx::query("DELETE FROM categories").execute(&mut *tx).await?;
    tx.commit().await?;
    Ok(())
}

/// Inserts all rows in one transaction; dropping the transaction on any error
/// rolls the whole batch back. Categories are created on first reference so
/// their generated ids are available for the product insert.
pub async fn insert_products(db: &Db, rows: &[ProductRow]) -> Result<()> {
    let mut tx = db.pool.begin().await?;
    for row in rows {
        let existing: Option<i64> =
            sqlx::query_scalar("SELECT id FROM categories WHERE name = $1")
                .bind(&row.category)
                .fetch_optional(&mut *tx)
                .await?;
        let category_id = match existing {
            Some(id) => id,
            None => {
                sqlx::query_scalar("INSERT INTO categories (name) VALUES ($1) RETURNING id")
                    .bind(&row.category)
                    .fetch_one(&mut *tx)
                    .await?
            }
        };

        // Source ids are inserted as-is; collisions surface as insert errors
        // and abort the cycle.
        match row.id {
            Some(id) => {
                sqlx::query(
                    "INSERT INTO products (id, name, price, image_url, on_main, category_id)
                     VALUES ($1, $2, $3, $4, $5, $6)",
                )
                .bind(id)
                .bind(&row.name)
                .bind(row.price)
                .bind(&row.image_url)
                .bind(row.on_main)
                .bind(category_id)
                .execute(&mut *tx)
                .await?;
            }
            None => {
                sqlx::query(
                    "INSERT INTO products (name, price, image_url, on_main, category_id)
                     VALUES ($1, $2, $3, $4, $5)",
                )
                .bind(&row.name)
                .bind(row.price)
                .bind(&row.image_url)
                .bind(row.on_main)
                .bind(category_id)
                .execute(&mut *tx)
                .await?;
            }
        }
    }
    tx.commit().await?;
    info!("inserted {} product rows", rows.len());
    Ok(())
}

/// Runs the aggregate summary query with the active filters.
pub async fn summarize(db: &Db, filter: &SummaryFilter) -> Result<CatalogSummary> {
    let mut qb: QueryBuilder<'_, Postgres> = QueryBuilder::new(
        "SELECT COUNT(*),
                COALESCE(AVG(p.price), 0)::float8,
                COALESCE(MIN(p.price), 0)::float8,
                COALESCE(MAX(p.price), 0)::float8
         FROM products p
         JOIN categories c ON c.id = p.category_id
         WHERE 1 = 1",
    );
    if let Some(name) = &filter.category {
        qb.push(" AND c.name = ").push_bind(name);
    }
    if let Some(min) = filter.min_price {
        qb.push(" AND p.price >= ").push_bind(min);
    }
    if let Some(max) = filter.max_price {
        qb.push(" AND p.price <= ").push_bind(max);
    }
    let (total, avg_price, min_price, max_price): (i64, f64, f64, f64) =
        qb.build_query_as().fetch_one(&db.pool).await?;

    // Distinct category names over the entire store, ignoring the filters.
    let categories: Vec<String> =
        sqlx::query_scalar("SELECT DISTINCT name FROM categories ORDER BY name")
            .fetch_all(&db.pool)
            .await?;

    // Any on_main product's image serves as the sample, filters ignored.
    let main_image: Option<String> =
        sqlx::query_scalar::<_, Option<String>>(
            "SELECT image_url FROM products WHERE on_main = TRUE LIMIT 1",
        )
        .fetch_optional(&db.pool)
        .await?
        .flatten();

    Ok(CatalogSummary {
        total,
        avg_price,
        min_price,
        max_price,
        categories,
        main_image,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, category: &str, price: f64, on_main: bool) -> ProductRow {
        ProductRow {
            id: None,
            name: name.to_string(),
            price,
            image_url: String::new(),
            on_main,
            category: category.to_string(),
        }
    }

    // End-to-end store check: schema init -> replace-all -> summary.
    // Requires a reachable Postgres; run with
    //   DATABASE_URL=postgres://... cargo test -- --ignored
    #[tokio::test]
    #[ignore] // Requires DATABASE_URL pointing at a scratch database
    async fn replace_all_then_summarize() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL not set");
        let db = Db::connect_lazy(&url, 2).expect("pool");
        db.init_schema().await.expect("schema");

        clear_catalog(&db).await.expect("clear");
        let rows = vec![
            ProductRow {
                id: Some(1),
                image_url: "http://x/main.png".to_string(),
                ..row("Ball", "A", 10.0, true)
            },
            row("Cube", "B", 20.0, false),
        ];
        insert_products(&db, &rows).await.expect("insert");

        let summary = summarize(&db, &SummaryFilter::default())
            .await
            .expect("summary");
        assert_eq!(summary.total, 2);
        assert_eq!(summary.avg_price, 15.0);
        assert_eq!(summary.min_price, 10.0);
        assert_eq!(summary.max_price, 20.0);
        assert_eq!(summary.categories, vec!["A", "B"]);
        assert_eq!(summary.main_image.as_deref(), Some("http://x/main.png"));

        // Filtered view narrows the aggregates but not the category list.
        let filtered = summarize(
            &db,
            &SummaryFilter {
                min_price: Some(15.0),
                ..SummaryFilter::default()
            },
        )
        .await
        .expect("summary");
        assert_eq!(filtered.total, 1);
        assert_eq!(filtered.min_price, 20.0);
        assert_eq!(filtered.categories, vec!["A", "B"]);

        // A fresh cycle replaces everything.
        clear_catalog(&db).await.expect("clear");
        let empty = summarize(&db, &SummaryFilter::default())
            .await
            .expect("summary");
        assert_eq!(empty.total, 0);
        assert_eq!(empty.avg_price, 0.0);
        assert_eq!(empty.min_price, 0.0);
        assert_eq!(empty.max_price, 0.0);
        assert!(empty.categories.is_empty());
    }
}
