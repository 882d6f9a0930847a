//! Tests for rendering results and the error modal.

use super::*;
use crate::model::AnalysisResult;

fn parse(json: &str) -> AnalysisResult {
    AnalysisResult::from_json(json.as_bytes()).unwrap()
}

#[test]
fn test_without_images_only_stats_are_written() {
    let controller = controller(FakeTransport::new());

    controller.render(&parse(&bare_result_json("s")));

    assert!(controller.view().images().is_empty());
    for kind in ImageKind::ALL {
        assert!(!controller.view().revealed(Panel::Preview(kind)));
    }
    assert!(controller.view().revealed(Panel::Results));
    assert!(controller.view().revealed(Panel::Plots));
    assert_eq!(controller.view().last_stats().map(|rows| rows.len()), Some(11));
}

#[test]
fn test_stat_values_verbatim() {
    let controller = controller(FakeTransport::new());

    controller.render(&parse(&bare_result_json("s")));

    let rows = controller.view().last_stats().unwrap();
    assert_eq!(
        rows[0],
        StatRow {
            label: "Total number of particles",
            value: "42".into()
        }
    );
    assert_eq!(
        rows[1],
        StatRow {
            label: "Surface Coverage (%)",
            value: "13.5".into()
        }
    );
    assert_eq!(rows[4].value, "0.000731");
}

#[test]
fn test_images_use_data_uris() {
    let controller = controller(FakeTransport::new());

    controller.render(&parse(&full_result_json("s")));

    assert_eq!(
        controller.view().images(),
        vec![
            (ImageKind::Segmented, "data:image/jpeg;base64,U0VH".to_string()),
            (ImageKind::Colored, "data:image/jpeg;base64,Q09M".to_string()),
            (ImageKind::Distribution, "data:image/png;base64,UExU".to_string()),
        ]
    );
    for kind in ImageKind::ALL {
        assert!(controller.view().revealed(Panel::Preview(kind)));
    }
}

#[test]
fn test_only_present_image_is_touched() {
    let controller = controller(FakeTransport::new());
    let json = bare_result_json("s").replacen('{', r#"{ "colored_image": "Q09M","#, 1);

    controller.render(&parse(&json));

    assert_eq!(
        controller.view().images(),
        vec![(ImageKind::Colored, "data:image/jpeg;base64,Q09M".to_string())]
    );
    assert!(!controller.view().revealed(Panel::Preview(ImageKind::Segmented)));
}

#[test]
fn test_render_never_hides() {
    let controller = controller(FakeTransport::new());

    controller.render(&parse(&full_result_json("a")));
    controller.render(&parse(&bare_result_json("b")));

    // Only reveals and writes were issued; there is no hide operation
    assert!(controller.view().events().iter().all(|e| !matches!(
        e,
        ViewEvent::Busy(..) | ViewEvent::Error(_) | ViewEvent::Save(_)
    )));
    assert_eq!(controller.view().images().len(), 3);
}

#[test]
fn test_show_error_overwrites() {
    let controller = controller(FakeTransport::new());

    controller.show_error("first");
    controller.show_error("second");

    assert_eq!(controller.view().errors(), vec!["first", "second"]);
    assert_eq!(
        controller.view().events().last(),
        Some(&ViewEvent::Error("second".into()))
    );
}
