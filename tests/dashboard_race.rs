mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::{RecordingRenderer, ScriptedRepository, btc, eth, series, take_fetch};
use crypto_dashboard_wasm::application::{Dashboard, HistoryOutcome};
use crypto_dashboard_wasm::config::DashboardConfig;
use crypto_dashboard_wasm::domain::errors::NetworkError;
use crypto_dashboard_wasm::domain::market_data::{AssetSummary, TimeWindow};
use crypto_dashboard_wasm::domain::state::{ActiveView, Phase};
use futures::executor::LocalPool;
use futures::task::LocalSpawnExt;

type TestDashboard = Dashboard<ScriptedRepository, RecordingRenderer>;

fn started_dashboard(pool: &mut LocalPool) -> (TestDashboard, Rc<RefCell<Vec<common::PendingFetch>>>) {
    let repository = ScriptedRepository::new(Ok(vec![btc(), eth()]));
    let pending = repository.pending();
    let dashboard = Dashboard::new(repository, RecordingRenderer::new(), &DashboardConfig::default());
    pool.run_until(dashboard.start());
    (dashboard, pending)
}

/// Spawns a selection and runs it up to its pending fetch
fn spawn_selection(
    pool: &mut LocalPool,
    dashboard: &TestDashboard,
    asset: AssetSummary,
    outcomes: &Rc<RefCell<Vec<(String, HistoryOutcome)>>>,
) {
    let dashboard = dashboard.clone();
    let outcomes = Rc::clone(outcomes);
    pool.spawner()
        .spawn_local(async move {
            let id = asset.id.to_string();
            let outcome = dashboard.select_asset(asset).await;
            outcomes.borrow_mut().push((id, outcome));
        })
        .unwrap();
    pool.run_until_stalled();
}

#[test]
fn later_selection_wins_when_earlier_fetch_settles_last() {
    let mut pool = LocalPool::new();
    let (dashboard, pending) = started_dashboard(&mut pool);
    let outcomes = Rc::new(RefCell::new(Vec::new()));

    spawn_selection(&mut pool, &dashboard, btc(), &outcomes);
    spawn_selection(&mut pool, &dashboard, eth(), &outcomes);
    pool.run_until_stalled();
    assert_eq!(pending.borrow().len(), 2);

    take_fetch(&pending, "ethereum").resolve(Ok(series("ethereum", TimeWindow::ThirtyDays, &[5.0, 6.0])));
    pool.run_until_stalled();
    take_fetch(&pending, "bitcoin").resolve(Ok(series("bitcoin", TimeWindow::ThirtyDays, &[1.0, 2.0])));
    pool.run_until_stalled();

    assert_eq!(
        *outcomes.borrow(),
        vec![
            ("ethereum".to_string(), HistoryOutcome::Applied),
            ("bitcoin".to_string(), HistoryOutcome::Discarded),
        ]
    );
    dashboard.with_controller(|controller| {
        assert_eq!(controller.state().phase(), Phase::Loaded);
        assert_eq!(
            controller.state().current_series().map(|s| s.asset_id().to_string()),
            Some("ethereum".to_string())
        );
        assert_eq!(controller.renderer().live_charts.get(), 1);
        assert_eq!(
            controller.renderer().calls.last().map(String::as_str),
            Some("loading: false")
        );
    });
}

#[test]
fn earlier_fetch_settling_first_is_still_discarded() {
    let mut pool = LocalPool::new();
    let (dashboard, pending) = started_dashboard(&mut pool);
    let outcomes = Rc::new(RefCell::new(Vec::new()));

    spawn_selection(&mut pool, &dashboard, btc(), &outcomes);
    spawn_selection(&mut pool, &dashboard, eth(), &outcomes);
    pool.run_until_stalled();

    take_fetch(&pending, "bitcoin").resolve(Ok(series("bitcoin", TimeWindow::ThirtyDays, &[1.0])));
    pool.run_until_stalled();
    dashboard.with_controller(|controller| {
        assert_eq!(controller.state().phase(), Phase::Loading);
        assert!(controller.state().stored_series().is_none());
    });

    take_fetch(&pending, "ethereum").resolve(Ok(series("ethereum", TimeWindow::ThirtyDays, &[5.0])));
    pool.run_until_stalled();

    assert_eq!(
        *outcomes.borrow(),
        vec![
            ("bitcoin".to_string(), HistoryOutcome::Discarded),
            ("ethereum".to_string(), HistoryOutcome::Applied),
        ]
    );
}

#[test]
fn search_and_select_end_to_end() {
    let mut pool = LocalPool::new();
    let (dashboard, pending) = started_dashboard(&mut pool);
    let outcomes = Rc::new(RefCell::new(Vec::new()));

    dashboard.search("et");
    let suggestion = dashboard.with_controller(|controller| {
        assert!(controller.state().is_search_open());
        controller.state().catalog().find(&eth().id).cloned()
    });
    spawn_selection(&mut pool, &dashboard, suggestion.unwrap(), &outcomes);
    pool.run_until_stalled();

    dashboard.with_controller(|controller| {
        assert_eq!(controller.state().phase(), Phase::Loading);
        assert_eq!(controller.state().active_view(), ActiveView::Detail);
    });

    let fetch = take_fetch(&pending, "ethereum");
    assert_eq!(fetch.window, TimeWindow::ThirtyDays);
    fetch.resolve(Ok(series("ethereum", TimeWindow::ThirtyDays, &[5.0, 6.0])));
    pool.run_until_stalled();

    let calls = dashboard.with_controller(|controller| controller.renderer().calls.clone());
    insta::assert_json_snapshot!(calls, @r###"
    [
      "toggle: 30",
      "loading: false",
      "catalog view",
      "grid: bitcoin, ethereum",
      "overlay: ethereum",
      "clear input",
      "hide overlay",
      "detail: ethereum",
      "loading: true",
      "chart: ethereum 30d (2 points)",
      "loading: false"
    ]
    "###);
}

#[test]
fn window_toggle_during_pending_fetch_applies_only_the_new_window() {
    let mut pool = LocalPool::new();
    let (dashboard, pending) = started_dashboard(&mut pool);
    let outcomes = Rc::new(RefCell::new(Vec::new()));

    spawn_selection(&mut pool, &dashboard, btc(), &outcomes);
    let window_outcome = Rc::new(RefCell::new(None));
    {
        let dashboard = dashboard.clone();
        let window_outcome = Rc::clone(&window_outcome);
        pool.spawner()
            .spawn_local(async move {
                *window_outcome.borrow_mut() = dashboard.change_window(TimeWindow::OneHundredEightyDays).await;
            })
            .unwrap();
    }
    pool.run_until_stalled();

    let fetches: Vec<_> = pending.borrow_mut().drain(..).collect();
    let mut windows: Vec<_> = fetches.iter().map(|fetch| fetch.window.days()).collect();
    windows.sort();
    assert_eq!(windows, vec![30, 180]);

    for fetch in fetches {
        let window = fetch.window;
        fetch.resolve(Ok(series("bitcoin", window, &[1.0, 2.0, 3.0])));
    }
    pool.run_until_stalled();

    assert_eq!(*outcomes.borrow(), vec![("bitcoin".to_string(), HistoryOutcome::Discarded)]);
    assert_eq!(*window_outcome.borrow(), Some(HistoryOutcome::Applied));
    dashboard.with_controller(|controller| {
        assert_eq!(
            controller.state().current_series().map(|s| s.window()),
            Some(TimeWindow::OneHundredEightyDays)
        );
    });
}

#[test]
fn failed_fetch_is_retryable() {
    let mut pool = LocalPool::new();
    let (dashboard, pending) = started_dashboard(&mut pool);
    let outcomes = Rc::new(RefCell::new(Vec::new()));

    spawn_selection(&mut pool, &dashboard, eth(), &outcomes);
    pool.run_until_stalled();
    take_fetch(&pending, "ethereum").resolve(Err(NetworkError::RequestFailed("offline".to_string()).into()));
    pool.run_until_stalled();

    dashboard.with_controller(|controller| {
        assert_eq!(controller.state().phase(), Phase::Idle);
        assert_eq!(controller.state().selection(), Some(&eth()));
        assert!(controller.state().last_failure().is_some());
    });

    spawn_selection(&mut pool, &dashboard, eth(), &outcomes);
    pool.run_until_stalled();
    take_fetch(&pending, "ethereum").resolve(Ok(series("ethereum", TimeWindow::ThirtyDays, &[5.0])));
    pool.run_until_stalled();

    assert_eq!(
        *outcomes.borrow(),
        vec![
            ("ethereum".to_string(), HistoryOutcome::Failed),
            ("ethereum".to_string(), HistoryOutcome::Applied),
        ]
    );
}

#[test]
fn returning_to_catalog_while_loading_ignores_the_response() {
    let mut pool = LocalPool::new();
    let (dashboard, pending) = started_dashboard(&mut pool);
    let outcomes = Rc::new(RefCell::new(Vec::new()));

    spawn_selection(&mut pool, &dashboard, btc(), &outcomes);
    pool.run_until_stalled();
    dashboard.return_to_catalog();

    take_fetch(&pending, "bitcoin").resolve(Ok(series("bitcoin", TimeWindow::ThirtyDays, &[1.0])));
    pool.run_until_stalled();

    assert_eq!(*outcomes.borrow(), vec![("bitcoin".to_string(), HistoryOutcome::Discarded)]);
    dashboard.with_controller(|controller| {
        assert_eq!(controller.state().active_view(), ActiveView::Catalog);
        assert_eq!(controller.renderer().live_charts.get(), 0);
    });
}

#[test]
fn unknown_id_does_not_fetch() {
    let mut pool = LocalPool::new();
    let (dashboard, pending) = started_dashboard(&mut pool);

    let outcome = pool.run_until(dashboard.select_asset_by_id(&"dogecoin".into()));

    assert_eq!(outcome, None);
    assert!(pending.borrow().is_empty());
}
