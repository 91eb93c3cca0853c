use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use locmap::commits::{breakdown, filter_by_time, format_percent, Breakdown, Pipeline};
use locmap::load::{parse_datetime, read_rows, LoadOptions};
use locmap::scale::{BrushRect, PlotArea, Point};
use locmap::state::{AppState, Event, ExploreConfig};
use locmap::tui::{handle_key, Flow, UiState};
use pretty_assertions::assert_eq;

const SCENARIO: &str = "\
commit,file,line,type,datetime
a1,x.js,1,js,2024-01-01T10:00
a1,x.js,2,js,2024-01-01T10:00
b2,y.css,1,css,2024-01-02T09:30
";

fn pipeline(csv: &str) -> Pipeline {
    let report = read_rows(csv.as_bytes(), &LoadOptions::default()).unwrap();
    Pipeline::from_dataset(report.into_dataset(), Some("https://example.com/commit/"))
}

fn explorer(csv: &str) -> AppState {
    AppState::new(pipeline(csv), ExploreConfig::default())
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

#[test]
fn scenario_aggregates_commits() {
    let p = pipeline(SCENARIO);
    let ids: Vec<&str> = p.commits.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["a1", "b2"]);
    assert_eq!(p.commits[0].total_lines, 2);
    assert_eq!(p.commits[0].hour_frac, 10.0);
    assert_eq!(p.commits[1].total_lines, 1);
    assert_eq!(p.commits[1].hour_frac, 9.5);
    assert_eq!(
        p.commits[0].url.as_deref(),
        Some("https://example.com/commit/a1")
    );
}

#[test]
fn scenario_cutoff_filters() {
    let p = pipeline(SCENARIO);
    let cutoff = parse_datetime("2024-01-01T23:59", None).unwrap();
    let shown = filter_by_time(&p.commits, cutoff);
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].id, "a1");
}

#[test]
fn scenario_breakdown_of_both_commits() {
    let p = pipeline(SCENARIO);
    match breakdown(p.commits.iter()) {
        Breakdown::Types { total_lines, entries } => {
            assert_eq!(total_lines, 3);
            let got: Vec<(&str, usize, String)> = entries
                .iter()
                .map(|e| (e.kind.as_str(), e.lines, format_percent(e.fraction)))
                .collect();
            assert_eq!(
                got,
                vec![("js", 2, "66.7%".to_string()), ("css", 1, "33.3%".to_string())]
            );
        }
        Breakdown::NoSelection => panic!("expected a breakdown"),
    }
}

#[test]
fn line_count_matches_attached_records() {
    let p = pipeline(SCENARIO);
    for c in &p.commits {
        assert_eq!(c.total_lines, c.lines().len());
        assert!(c.lines().iter().all(|l| l.commit == c.id));
    }
    let total: usize = p.commits.iter().map(|c| c.total_lines).sum();
    assert_eq!(total, p.dataset.len());
}

#[test]
fn serialized_commit_hides_lines() {
    let p = pipeline(SCENARIO);
    let v = serde_json::to_value(&p.commits[0]).unwrap();
    assert!(v.get("lines").is_none());
    assert_eq!(v["total_lines"], 2);
}

#[test]
fn ties_keep_row_order() {
    let csv = "\
commit,file,line,datetime
z9,a.rs,1,2024-05-01T12:00:00Z
a0,b.rs,1,2024-05-01T12:00:00Z
m5,c.rs,1,2024-04-01T12:00:00Z
";
    let p = pipeline(csv);
    let ids: Vec<&str> = p.commits.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["m5", "z9", "a0"]);
    assert_eq!(p.commits[1].lines()[0].kind, "rs");
}

#[test]
fn filtering_is_monotonic_in_cutoff() {
    let p = pipeline(SCENARIO);
    let scale = p.time_scale.unwrap();
    let mut last = 0;
    for step in 0..=20 {
        let shown = filter_by_time(&p.commits, scale.invert(step as f64 * 5.0)).len();
        assert!(shown >= last);
        last = shown;
    }
    assert_eq!(last, p.commits.len());
}

#[test]
fn explorer_starts_with_everything_shown_and_nothing_selected() {
    let app = explorer(SCENARIO);
    assert_eq!(app.progress(), 100.0);
    assert_eq!(app.visible_commits().len(), 2);
    assert!(app.selection().is_empty());
    assert_eq!(app.breakdown(), Breakdown::NoSelection);
    assert_eq!(app.selection().label(), "No commits selected");
}

#[test]
fn brushing_the_whole_plot_selects_all() {
    let mut app = explorer(SCENARIO);
    let plot = PlotArea::default();
    assert!(app.dispatch(Event::BrushStarted(Point::new(0.0, 0.0))));
    assert!(app.is_brushing());
    app.dispatch(Event::BrushMoved(Point::new(plot.width, plot.height)));
    assert_eq!(app.selection().len(), 2);
    app.dispatch(Event::BrushEnded(Point::new(plot.width, plot.height)));
    assert!(!app.is_brushing());
    assert_eq!(app.brush(), Some(&BrushRect::full(&plot)));
    assert_eq!(app.selection().label(), "2 commits selected");
    assert!(app.breakdown().is_selection());

    assert!(app.dispatch(Event::BrushCleared));
    assert!(app.selection().is_empty());
    assert!(!app.dispatch(Event::BrushCleared));
}

#[test]
fn click_without_drag_clears_brush() {
    let mut app = explorer(SCENARIO);
    let p = Point::new(300.0, 300.0);
    app.dispatch(Event::BrushStarted(p));
    app.dispatch(Event::BrushEnded(p));
    assert_eq!(app.brush(), None);
    assert!(app.selection().is_empty());
}

#[test]
fn progress_moves_cutoff_and_keeps_selection_over_all_commits() {
    let mut app = explorer(SCENARIO);
    let plot = PlotArea::default();
    app.dispatch(Event::BrushStarted(Point::new(0.0, 0.0)));
    app.dispatch(Event::BrushEnded(Point::new(plot.width, plot.height)));

    assert!(app.dispatch(Event::ProgressChanged(0.0)));
    assert_eq!(app.visible_commits().len(), 1);
    assert_eq!(app.cutoff(), Some(app.commits()[0].datetime));
    assert!(!app.dispatch(Event::ProgressChanged(0.0)));

    app.dispatch(Event::ProgressChanged(250.0));
    assert_eq!(app.progress(), 100.0);
    assert_eq!(app.visible_commits().len(), 2);
}

#[test]
fn disabled_slider_ignores_progress() {
    let config = ExploreConfig {
        time_slider: false,
        ..Default::default()
    };
    let mut app = AppState::new(pipeline(SCENARIO), config);
    assert!(!app.dispatch(Event::ProgressChanged(0.0)));
    assert_eq!(app.visible_commits().len(), 2);
}

#[test]
fn hover_is_limited_to_plotted_commits() {
    let mut app = explorer(SCENARIO);
    app.dispatch(Event::ProgressChanged(0.0));
    assert!(!app.dispatch(Event::Hover(Some(1))));
    assert!(app.dispatch(Event::Hover(Some(0))));
    assert_eq!(app.hovered_commit().map(|c| c.id.as_str()), Some("a1"));
}

#[test]
fn resize_drops_the_brush() {
    let mut app = explorer(SCENARIO);
    app.dispatch(Event::BrushStarted(Point::new(0.0, 0.0)));
    app.dispatch(Event::BrushEnded(Point::new(500.0, 500.0)));
    assert!(app.brush().is_some());
    assert!(app.dispatch(Event::Resize(PlotArea::with_size(800.0, 400.0))));
    assert_eq!(app.brush(), None);
}

#[test]
fn keys_drive_the_explorer() {
    let mut app = explorer(SCENARIO);
    let mut ui = UiState::new(&app);

    assert_eq!(handle_key(key(KeyCode::Home), &mut ui, &mut app), Flow::Continue);
    assert_eq!(app.progress(), 0.0);
    handle_key(key(KeyCode::Char('.')), &mut ui, &mut app);
    assert_eq!(app.progress(), 1.0);
    handle_key(key(KeyCode::End), &mut ui, &mut app);
    assert_eq!(app.progress(), 100.0);

    handle_key(key(KeyCode::Char('j')), &mut ui, &mut app);
    assert_eq!(app.hovered(), Some(0));
    handle_key(key(KeyCode::Char('j')), &mut ui, &mut app);
    assert_eq!(app.hovered(), Some(1));
    handle_key(key(KeyCode::Char('j')), &mut ui, &mut app);
    assert_eq!(app.hovered(), Some(1));

    handle_key(key(KeyCode::Char('h')), &mut ui, &mut app);
    assert!(ui.show_help);
    handle_key(key(KeyCode::Esc), &mut ui, &mut app);
    assert!(!ui.show_help);

    assert_eq!(handle_key(key(KeyCode::Char('q')), &mut ui, &mut app), Flow::Quit);
}

#[test]
fn keyboard_brush_follows_the_cursor() {
    let mut app = explorer(SCENARIO);
    let mut ui = UiState::new(&app);
    ui.cursor = Point::new(0.0, 0.0);

    handle_key(key(KeyCode::Char('b')), &mut ui, &mut app);
    assert!(app.is_brushing());
    for _ in 0..60 {
        handle_key(key(KeyCode::Right), &mut ui, &mut app);
        handle_key(key(KeyCode::Down), &mut ui, &mut app);
    }
    handle_key(key(KeyCode::Enter), &mut ui, &mut app);
    assert!(!app.is_brushing());
    assert_eq!(app.selection().len(), 2);

    handle_key(key(KeyCode::Esc), &mut ui, &mut app);
    assert!(app.selection().is_empty());
}

#[test]
fn scrolling_can_drive_time() {
    let csv = (0..30)
        .map(|i| format!("c{i:02},f.rs,1,2024-01-{:02}T12:00:00Z\n", i + 1))
        .collect::<String>();
    let csv = format!("commit,file,line,datetime\n{csv}");
    let config = ExploreConfig {
        scroll_drives_time: true,
        ..Default::default()
    };
    let mut app = AppState::new(pipeline(&csv), config);
    app.dispatch(Event::ViewportChanged(5));
    assert_eq!(app.list_len(), 30);

    assert!(app.dispatch(Event::Scrolled(10.0)));
    assert_eq!(app.list_range().start, 10);
    assert_eq!(app.visible_commits().len(), 11);
    assert_eq!(app.visible_commits().last().map(|c| c.id.as_str()), Some("c10"));

    app.dispatch(Event::Scrolled(1000.0));
    assert_eq!(app.scroll(), 25.0);
}

fn daily_commits(n: usize) -> String {
    let rows = (0..n)
        .map(|i| format!("c{i:02},f.rs,1,2024-01-{:02}T12:00:00Z\n", i + 1))
        .collect::<String>();
    format!("commit,file,line,datetime\n{rows}")
}

fn scroll_driven(n: usize) -> AppState {
    let config = ExploreConfig {
        scroll_drives_time: true,
        ..Default::default()
    };
    let mut app = AppState::new(pipeline(&daily_commits(n)), config);
    app.dispatch(Event::ViewportChanged(5));
    app
}

#[test]
fn scroll_driven_start_matches_first_row() {
    let app = scroll_driven(30);
    assert_eq!(app.list_range().start, 0);
    assert_eq!(app.progress(), 0.0);
    assert_eq!(app.visible_commits().len(), 1);
}

#[test]
fn stepping_hover_through_a_scroll_driven_list() {
    let mut app = scroll_driven(30);
    let mut ui = UiState::new(&app);

    let mut seen = Vec::new();
    for _ in 0..10 {
        handle_key(key(KeyCode::Char('j')), &mut ui, &mut app);
        seen.push(app.hovered());
    }
    let expected: Vec<Option<usize>> = (0..10).map(Some).collect();
    assert_eq!(seen, expected);
    // the hovered row is in view and the cutoff follows the first row
    assert!(app.list_range().contains(&9));
    assert_eq!(app.scroll(), 5.0);
    assert_eq!(app.visible_commits().len(), 6);

    handle_key(key(KeyCode::Char('k')), &mut ui, &mut app);
    assert_eq!(app.hovered(), Some(8));
}

#[test]
fn list_clicks_hover_any_listed_row() {
    use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
    use locmap::tui::handle_mouse;
    use ratatui::layout::Rect;

    let mut app = scroll_driven(30);
    app.dispatch(Event::Scrolled(10.0));
    let mut ui = UiState::new(&app);
    ui.list_inner = Rect::new(0, 20, 80, 8);

    let click = MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column: 4,
        row: 24,
        modifiers: KeyModifiers::NONE,
    };
    handle_mouse(click, &mut ui, &mut app);
    // header row at 20, first commit row at 21
    assert_eq!(app.hovered(), Some(13));
}

const SHUFFLED: &str = "\
commit,file,line,type,datetime
c3,a.svelte,1,svelte,2024-03-03T22:10:00Z
a1,b.js,1,js,2024-03-01T08:00:00Z
c3,a.svelte,2,svelte,2024-03-03T22:10:00Z
b2,c.css,1,css,2024-03-02T13:45:00Z
a1,c.css,1,css,2024-03-01T08:00:00Z
b2,b.js,2,js,2024-03-02T13:45:00Z
c3,b.js,3,js,2024-03-03T22:10:00Z
";

#[test]
fn aggregate_counts_and_order_hold_for_any_row_order() {
    let p = pipeline(SHUFFLED);
    assert_eq!(p.commits.len(), 3);
    let total: usize = p.commits.iter().map(|c| c.total_lines).sum();
    assert_eq!(total, 7);
    assert!(p.commits.windows(2).all(|w| w[0].datetime <= w[1].datetime));
}

#[test]
fn breakdown_counts_and_fractions_sum_up() {
    let p = pipeline(SHUFFLED);
    let b = breakdown(p.commits.iter().skip(1));
    let selected: usize = p.commits.iter().skip(1).map(|c| c.total_lines).sum();
    let counts: usize = b.entries().iter().map(|e| e.lines).sum();
    let fractions: f64 = b.entries().iter().map(|e| e.fraction).sum();
    assert_eq!(counts, selected);
    assert!((fractions - 1.0).abs() < 1e-9);
    let kinds: Vec<&str> = b.entries().iter().map(|e| e.kind.as_str()).collect();
    assert_eq!(kinds, vec!["css", "js", "svelte"]);
}

#[test]
fn selection_is_stable_across_recomputation() {
    let p = pipeline(SHUFFLED);
    let area = PlotArea::default();
    let scales = locmap::scale::PlotScales::new(&p.commits, area).unwrap();
    let rect = BrushRect::new(0.0, 0.0, area.width, area.height / 2.0);
    let first = locmap::commits::select_with_scales(&p.commits, &scales, Some(&rect));
    let second = locmap::commits::select_with_scales(&p.commits, &scales, Some(&rect));
    assert_eq!(first, second);
    // upper half of the plot is the afternoon and evening
    let ids: Vec<&str> = first.commits(&p.commits).map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["b2", "c3"]);
    assert!(locmap::commits::select_with_scales(&p.commits, &scales, None).is_empty());
}
