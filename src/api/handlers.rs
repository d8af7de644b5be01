// HTTP request handlers

use actix_web::{web, HttpResponse, Result};

use crate::api::models::InfoParams;
use crate::database_ops::catalog::{self, CatalogSummary, SummaryFilter};
use crate::database_ops::db::Db;

/// `GET /info`: plain-text aggregate summary over the stored catalog.
///
/// Invalid bounds are rejected before any query runs; the store is never
/// touched on the 400 path.
pub async fn info(query: web::Query<InfoParams>, db: web::Data<Db>) -> Result<HttpResponse> {
    let params = query.into_inner();
    if let Err(reason) = params.validate() {
        return Ok(HttpResponse::BadRequest()
            .content_type("text/plain; charset=utf-8")
            .body(format!("Invalid params: {reason}")));
    }

    let filter = SummaryFilter {
        category: params.category_filter(),
        min_price: params.min_price,
        max_price: params.max_price,
    };

    let summary = match catalog::summarize(&db, &filter).await {
        Ok(summary) => summary,
        Err(err) => {
            tracing::error!(error = %err, "summary query failed");
            return Ok(HttpResponse::InternalServerError()
                .content_type("text/plain; charset=utf-8")
                .body("summary query failed"));
        }
    };

    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(render_summary(&summary)))
}

/// Renders the fixed-order response lines. Empty category lists and missing
/// or empty sample images render as the em-dash placeholder.
pub fn render_summary(summary: &CatalogSummary) -> String {
    let categories = if summary.categories.is_empty() {
        "—".to_string()
    } else {
        summary.categories.join(", ")
    };
    let image = match summary.main_image.as_deref() {
        Some(url) if !url.is_empty() => url,
        _ => "—",
    };
    [
        format!("Всего товаров: {}", summary.total),
        format!("Средняя цена: {:.2} руб.", summary.avg_price),
        format!(
            "Мин/макс цена: {:.2} — {:.2} руб.",
            summary.min_price, summary.max_price
        ),
        format!("Категории: {categories}"),
        format!("Пример главного изображения: {image}"),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> CatalogSummary {
        CatalogSummary {
            total: 2,
            avg_price: 15.0,
            min_price: 10.0,
            max_price: 20.0,
            categories: vec!["A".to_string(), "B".to_string()],
            main_image: Some("http://x/main.png".to_string()),
        }
    }

    #[test]
    fn renders_fixed_order_lines_with_two_decimals() {
        let text = render_summary(&summary());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Всего товаров: 2",
                "Средняя цена: 15.00 руб.",
                "Мин/макс цена: 10.00 — 20.00 руб.",
                "Категории: A, B",
                "Пример главного изображения: http://x/main.png",
            ]
        );
    }

    #[test]
    fn empty_store_renders_zeroes_and_placeholders() {
        let empty = CatalogSummary {
            total: 0,
            avg_price: 0.0,
            min_price: 0.0,
            max_price: 0.0,
            categories: Vec::new(),
            main_image: None,
        };
        let text = render_summary(&empty);
        assert!(text.contains("Всего товаров: 0"));
        assert!(text.contains("Мин/макс цена: 0.00 — 0.00 руб."));
        assert!(text.contains("Категории: —"));
        assert!(text.ends_with("Пример главного изображения: —"));
    }

    #[test]
    fn empty_image_url_renders_placeholder() {
        let mut s = summary();
        s.main_image = Some(String::new());
        assert!(render_summary(&s).ends_with("Пример главного изображения: —"));
    }
}
