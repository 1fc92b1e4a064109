use crypto_dashboard_wasm::domain::market_data::{
    AssetId, AssetSearchService, AssetSummary, Catalog, DEFAULT_SUGGESTION_LIMIT,
};
use quickcheck_macros::quickcheck;

fn asset(id: &str, name: &str, symbol: &str) -> AssetSummary {
    AssetSummary {
        id: AssetId::from(id),
        name: name.to_string(),
        symbol: symbol.to_string(),
        image_url: String::new(),
        current_price: 1.0,
        price_change_24h_pct: 0.0,
        price_change_30d_pct: None,
        market_cap: 0.0,
    }
}

/// Assets built from arbitrary names; ids are positional so they stay unique
fn catalog_from(names: &[String]) -> Vec<AssetSummary> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| asset(&format!("asset-{i}"), name, &name.chars().take(3).collect::<String>()))
        .collect()
}

#[quickcheck]
fn never_more_than_eight_suggestions(names: Vec<String>, query: String) -> bool {
    let assets = catalog_from(&names);
    AssetSearchService::default().search(&assets, &query).len() <= DEFAULT_SUGGESTION_LIMIT
}

#[quickcheck]
fn every_suggestion_contains_the_query(names: Vec<String>, query: String) -> bool {
    let assets = catalog_from(&names);
    let Some(needle) = AssetSearchService::normalize(&query) else {
        return AssetSearchService::default().search(&assets, &query).is_empty();
    };
    AssetSearchService::default()
        .search(&assets, &query)
        .iter()
        .all(|a| a.name.to_lowercase().contains(&needle) || a.symbol.to_lowercase().contains(&needle))
}

#[quickcheck]
fn whitespace_queries_find_nothing(names: Vec<String>, spaces: u8) -> bool {
    let assets = catalog_from(&names);
    let query = " ".repeat(spaces as usize % 8);
    AssetSearchService::default().search(&assets, &query).is_empty()
}

#[test]
fn matches_name_or_symbol_case_insensitively() {
    let assets = vec![
        asset("bitcoin", "Bitcoin", "BTC"),
        asset("ethereum", "Ethereum", "ETH"),
        asset("tether", "Tether", "USDT"),
    ];
    let search = AssetSearchService::default();

    let ids = |query: &str| -> Vec<String> {
        search.search(&assets, query).iter().map(|a| a.id.to_string()).collect()
    };
    assert_eq!(ids("et"), vec!["ethereum", "tether"]);
    assert_eq!(ids("BTC"), vec!["bitcoin"]);
    assert_eq!(ids("  usdt "), vec!["tether"]);
    assert!(ids("xrp").is_empty());
}

#[test]
fn keeps_catalog_order_and_truncates() {
    let assets: Vec<_> = (0..20)
        .map(|i| asset(&format!("coin-{i}"), &format!("Coin {i}"), "CN"))
        .collect();

    let results = AssetSearchService::default().search(&assets, "coin");

    let ids: Vec<_> = results.iter().map(|a| a.id.to_string()).collect();
    assert_eq!(ids, (0..8).map(|i| format!("coin-{i}")).collect::<Vec<_>>());
}

#[test]
fn catalog_drops_duplicate_ids() {
    let catalog = Catalog::from_assets(vec![
        asset("bitcoin", "Bitcoin", "BTC"),
        asset("bitcoin", "Bitcoin Copy", "BTC"),
        asset("ethereum", "Ethereum", "ETH"),
    ]);

    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.find(&AssetId::from("bitcoin")).map(|a| a.name.as_str()), Some("Bitcoin"));
    assert_eq!(catalog.top(1).len(), 1);
    assert_eq!(catalog.top(10).len(), 2);
}
