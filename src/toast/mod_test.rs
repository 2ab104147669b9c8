use super::*;

const LIFETIME: Duration = Duration::from_millis(5000);

fn toaster() -> (Toaster<MemorySurface, ManualScheduler>, ManualScheduler) {
    let clock = ManualScheduler::new();
    let toaster = Toaster::new(Rc::new(MemorySurface::new()), clock.clone());
    (toaster, clock)
}

// =============================================================
// Severity
// =============================================================

#[test]
fn severity_tags_map_to_alert_classes() {
    assert_eq!(Severity::from_tag("error").alert_class(), "alert-danger");
    assert_eq!(Severity::from_tag("success").alert_class(), "alert-success");
    assert_eq!(Severity::from_tag("info").alert_class(), "alert-info");
}

#[test]
fn unknown_severity_tags_fall_back_to_info() {
    assert_eq!(Severity::from_tag("warning"), Severity::Info);
    assert_eq!(Severity::from_tag("ERROR"), Severity::Info);
    assert_eq!(Severity::from(""), Severity::Info);
    assert_eq!(Severity::default(), Severity::Info);
}

// =============================================================
// Toast rendering
// =============================================================

#[test]
fn text_content_is_escaped() {
    let content = ToastContent::from("<b>Tom & \"Jerry\"</b>");
    assert_eq!(content.to_html(), "&lt;b&gt;Tom &amp; &quot;Jerry&quot;&lt;/b&gt;");
}

#[test]
fn markup_content_is_verbatim() {
    let content = ToastContent::Markup("<b>saved</b>".into());
    assert_eq!(content.to_html(), "<b>saved</b>");
}

#[test]
fn script_messages_are_text_unless_markup_is_requested() {
    let (content, severity) = script_toast("<b>saved</b>".into(), None, None);
    assert_eq!(content, ToastContent::Text("<b>saved</b>".into()));
    assert_eq!(severity, Severity::Info);

    let (content, _) = script_toast("<b>saved</b>".into(), Some("success"), Some(false));
    assert_eq!(content.to_html(), "&lt;b&gt;saved&lt;/b&gt;");
}

#[test]
fn script_markup_flag_renders_verbatim() {
    let (content, severity) = script_toast("<b>saved</b>".into(), Some("error"), Some(true));
    assert_eq!(content, ToastContent::Markup("<b>saved</b>".into()));
    assert_eq!(severity, Severity::Error);

    let (toaster, _clock) = toaster();
    let id = toaster.show(content, severity).unwrap();
    let shown = toaster.surface().snapshot();
    assert_eq!(shown[0].id(), id);
    assert!(shown[0].inner_html().starts_with("<b>saved</b>"));
}

#[test]
fn banner_carries_position_classes_and_dismiss_control() {
    let (toaster, _) = toaster();
    toaster.show("done", Severity::Success).unwrap();
    let banner = &toaster.surface().snapshot()[0];

    assert_eq!(
        banner.class_name(),
        "alert alert-success alert-dismissible fade show position-fixed top-0 start-50 translate-middle-x mt-3"
    );
    assert_eq!(banner.style(), "z-index: 9999");
    assert_eq!(
        banner.inner_html(),
        r#"done<button type="button" class="btn-close" data-bs-dismiss="alert"></button>"#
    );
}

#[test]
fn toast_id_dom_id_and_display() {
    let (toaster, _) = toaster();
    let id = toaster.show("a", Severity::Info).unwrap();
    assert_eq!(id.get(), 1);
    assert_eq!(id.to_string(), "1");
    assert_eq!(id.dom_id(), "panel-toast-1");
}

// =============================================================
// Toaster lifecycle
// =============================================================

#[test]
fn error_toast_is_present_then_removed_after_lifetime() {
    let (toaster, clock) = toaster();
    let id = toaster.show("failed", Severity::Error).unwrap();

    let attached = toaster.surface().snapshot();
    assert_eq!(attached.len(), 1);
    assert_eq!(attached[0].severity().alert_class(), "alert-danger");

    clock.advance(LIFETIME - Duration::from_millis(1));
    assert!(toaster.surface().contains(id));

    clock.advance(Duration::from_millis(1));
    assert!(toaster.surface().is_empty());
    assert_eq!(toaster.pending_removals(), 0);
}

#[test]
fn rapid_toasts_stack_and_expire_independently() {
    let (toaster, clock) = toaster();
    let first = toaster.show("one", Severity::Info).unwrap();
    clock.advance(Duration::from_millis(1000));
    let second = toaster.show("two", Severity::Info).unwrap();
    let third = toaster.show("two", Severity::Info).unwrap();

    assert_eq!(toaster.surface().len(), 3);
    assert_ne!(second, third);

    clock.advance(Duration::from_millis(4000));
    assert!(!toaster.surface().contains(first));
    assert!(toaster.surface().contains(second));
    assert!(toaster.surface().contains(third));

    clock.advance(Duration::from_millis(1000));
    assert!(toaster.surface().is_empty());
}

#[test]
fn cancel_removal_keeps_toast_on_screen() {
    let (toaster, clock) = toaster();
    let id = toaster.show("sticky", Severity::Info).unwrap();

    assert!(toaster.cancel_removal(id));
    assert!(!toaster.cancel_removal(id));
    clock.advance(LIFETIME * 2);
    assert!(toaster.surface().contains(id));
}

#[test]
fn cancelled_and_dismissed_removals_release_their_task() {
    let (toaster, clock) = toaster();
    let kept = toaster.show("kept", Severity::Info).unwrap();
    let gone = toaster.show("gone", Severity::Info).unwrap();
    // One clone per scheduled removal task.
    assert_eq!(Rc::strong_count(toaster.surface()), 3);

    toaster.cancel_removal(kept);
    toaster.dismiss(gone);
    clock.advance(Duration::ZERO);

    assert_eq!(toaster.pending_removals(), 0);
    assert_eq!(clock.pending(), 0);
    assert_eq!(Rc::strong_count(toaster.surface()), 1);
}

#[test]
fn dismiss_then_timer_fire_is_noop() {
    let (toaster, clock) = toaster();
    let id = toaster.show("bye", Severity::Info).unwrap();

    assert!(toaster.dismiss(id));
    assert!(!toaster.dismiss(id));
    assert_eq!(clock.advance(LIFETIME), 0);
    assert!(toaster.surface().is_empty());
}

#[test]
fn externally_removed_toast_tolerates_expiry() {
    let (toaster, clock) = toaster();
    let id = toaster.show("closed by user", Severity::Info).unwrap();

    toaster.surface().detach(id);
    assert_eq!(clock.advance(LIFETIME), 1);
    assert!(toaster.surface().is_empty());
}

#[test]
fn config_overrides_lifetime_and_z_index() {
    let clock = ManualScheduler::new();
    let config = UiConfig { toast_lifetime_ms: 1500, toast_z_index: 42, ..UiConfig::default() };
    let toaster = Toaster::with_config(Rc::new(MemorySurface::new()), clock.clone(), &config);
    toaster.show("quick", Severity::Info).unwrap();

    assert_eq!(toaster.lifetime(), Duration::from_millis(1500));
    assert_eq!(toaster.surface().snapshot()[0].z_index(), 42);
    clock.advance(Duration::from_millis(1500));
    assert!(toaster.surface().is_empty());
}

// =============================================================
// Surface failures
// =============================================================

struct BrokenSurface;

impl ToastSurface for BrokenSurface {
    fn attach(&self, _toast: &Toast) -> Result<(), UiError> {
        Err(UiError::HostUnavailable("document.body"))
    }

    fn detach(&self, _id: ToastId) -> bool {
        false
    }
}

#[test]
fn attach_failure_schedules_nothing() {
    let clock = ManualScheduler::new();
    let toaster = Toaster::new(Rc::new(BrokenSurface), clock.clone());

    let err = toaster.show("lost", Severity::Error).unwrap_err();
    assert_eq!(err.error_code(), "E_HOST_UNAVAILABLE");
    assert_eq!(clock.pending(), 0);
    assert_eq!(toaster.pending_removals(), 0);
}
