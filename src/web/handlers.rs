// src/web/handlers.rs
use axum::{
    extract::{Path, State},
    http::Uri,
    response::Html,
};
use serde::Serialize;
use tera::Context;

use super::{SharedState, WebError};
use crate::company::Company;

#[derive(Serialize)]
struct CompanyListing {
    name: &'static str,
    ticker: &'static str,
    slug: &'static str,
    years: Vec<u32>,
}

#[derive(Serialize)]
struct ChartView {
    id: String,
    title: String,
    color: &'static str,
    years: Vec<u32>,
    values: Vec<i64>,
}

/// Bar colors for the (net income, operating income) charts.
fn chart_colors(company: Company) -> (&'static str, &'static str) {
    match company {
        Company::Apple => ("blue", "green"),
        Company::Microsoft => ("red", "purple"),
    }
}

/// GET /
pub async fn index(State(state): State<SharedState>) -> Result<Html<String>, WebError> {
    let companies: Vec<CompanyListing> = state
        .data
        .iter()
        .map(|(company, data)| CompanyListing {
            name: company.name(),
            ticker: company.ticker(),
            slug: company.slug(),
            years: data.years().to_vec(),
        })
        .collect();

    let mut context = Context::new();
    context.insert("companies", &companies);
    state.render("home.html", &context)
}

/// GET /stock/:name/:year — one year next to the closest earlier year with data.
pub async fn stock_year(
    State(state): State<SharedState>,
    Path((name, year)): Path<(String, String)>,
) -> Result<Html<String>, WebError> {
    let (company, year, figures) = state.data.lookup(&name, &year)?;
    let previous = state.data.company(company).and_then(|data| data.previous(year));

    let mut context = Context::new();
    context.insert("stock_name", company.name());
    context.insert("slug", company.slug());
    context.insert("year", &year);
    context.insert("net_income", &figures.net_income);
    context.insert("operating_income", &figures.operating_income);
    context.insert("summary", &figures.summary);
    context.insert("prev_year", &previous.map(|(y, _)| y));
    context.insert("prev_net_income", &previous.map(|(_, f)| f.net_income));
    context.insert("prev_operating_income", &previous.map(|(_, f)| f.operating_income));
    state.render("year.html", &context)
}

/// GET /dash/:name — net and operating income history as bar charts.
pub async fn charts(
    State(state): State<SharedState>,
    Path(name): Path<String>,
) -> Result<Html<String>, WebError> {
    let company = Company::from_slug(&name)?;
    let series = state
        .data
        .company(company)
        .map(|data| data.series().clone())
        .unwrap_or_default();
    let (net_color, operating_color) = chart_colors(company);

    let charts = vec![
        ChartView {
            id: format!("{}-net-income", company.slug()),
            title: format!("{} Net Income by Year", company.name()),
            color: net_color,
            years: series.years.clone(),
            values: series.net_incomes,
        },
        ChartView {
            id: format!("{}-operating-income", company.slug()),
            title: format!("{} Operating Income by Year", company.name()),
            color: operating_color,
            years: series.years,
            values: series.operating_incomes,
        },
    ];

    let mut context = Context::new();
    context.insert("stock_name", company.name());
    context.insert("charts", &charts);
    state.render("charts.html", &context)
}

pub async fn not_found(uri: Uri) -> WebError {
    WebError::NotFound(uri.path().to_string())
}
