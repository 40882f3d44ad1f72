//! Reactive controller for the reset screen.
//!
//! Wraps a `FormState` signal and owns the one asynchronous step in the
//! flow: the simulated password change. The pending completion is a
//! scoped task tagged with a `SubmitTicket`; teardown cancels the task and
//! invalidates the ticket so nothing lands on a discarded form.

use dioxus::core::Task;
use dioxus::prelude::*;
use shared_types::{AppError, FlowConfig, FormState, SubmitTicket};
use std::time::Duration;

/// Outbound navigation to the host application.
pub trait HostNavigator {
    fn navigate(&self, target: &str);
}

/// Hands control back to the host app by pointing the webview at a deep link.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeepLinkNavigator;

impl HostNavigator for DeepLinkNavigator {
    fn navigate(&self, target: &str) {
        let js = format!(
            "window.location.href = {};",
            serde_json::Value::from(target)
        );
        spawn(async move {
            if let Err(e) = document::eval(&js).await {
                tracing::warn!("Deep link navigation failed: {e:?}");
            }
        });
    }
}

/// Stand-in for the network round trip of a real password change.
#[cfg(not(target_arch = "wasm32"))]
pub async fn simulated_latency(latency: Duration) {
    tokio::time::sleep(latency).await;
}

/// Stand-in for the network round trip of a real password change.
#[cfg(target_arch = "wasm32")]
pub async fn simulated_latency(latency: Duration) {
    let js = format!(
        "await new Promise(resolve => setTimeout(resolve, {})); return null;",
        latency.as_millis()
    );
    if let Err(e) = document::eval(&js).await {
        tracing::warn!("Latency timer failed: {e:?}");
    }
}

/// Wait out the latency, then hand the ticket to `apply`.
///
/// `apply` returns whether the completion landed; a `false` means the
/// ticket went stale (teardown) and the result was dropped.
pub async fn settle_submission(
    latency: Duration,
    ticket: SubmitTicket,
    apply: impl FnOnce(SubmitTicket) -> bool,
) -> bool {
    simulated_latency(latency).await;
    let applied = apply(ticket);
    if applied {
        tracing::info!(generation = ticket.generation(), "Password updated");
    } else {
        tracing::debug!(
            generation = ticket.generation(),
            "Dropping stale password change completion"
        );
    }
    applied
}

/// Send the host to the deep link. Only valid once the flow has finished.
pub fn redirect_with(state: &FormState, navigator: &impl HostNavigator) -> Result<(), AppError> {
    let target = state.redirect_target()?;
    tracing::info!(deep_link = target, "Returning to host app");
    navigator.navigate(target);
    Ok(())
}

#[derive(Clone, Copy)]
pub struct ResetFlow {
    state: Signal<FormState>,
    pending: Signal<Option<Task>>,
    latency: Duration,
}

/// Create the reset controller for the current component.
pub fn use_reset_flow(config: &FlowConfig) -> ResetFlow {
    let latency = config.simulated_latency();
    let state = use_signal(FormState::new);
    let pending = use_signal(|| None::<Task>);
    let flow = use_hook(|| ResetFlow {
        state,
        pending,
        latency,
    });

    use_drop(move || {
        let mut flow = flow;
        flow.teardown();
    });

    flow
}

impl ResetFlow {
    pub fn state(&self) -> Signal<FormState> {
        self.state
    }

    pub fn set_password(&mut self, value: String) {
        if !self.state.with_mut(|s| s.set_password(value)) {
            tracing::trace!("Ignoring password edit while locked");
        }
    }

    pub fn set_confirm_password(&mut self, value: String) {
        if !self.state.with_mut(|s| s.set_confirm_password(value)) {
            tracing::trace!("Ignoring confirmation edit while locked");
        }
    }

    /// Validate and start the simulated password change.
    ///
    /// Guard failures leave the form untouched and are returned to the caller.
    pub fn submit(&mut self) -> Result<(), AppError> {
        // Guard on a copy so a rejected submit never notifies subscribers.
        let mut next = FormState::clone(&self.state.peek());
        let ticket = match next.begin_submit() {
            Ok(ticket) => ticket,
            Err(e) => {
                tracing::warn!(kind = %e.kind, "Password change rejected: {}", e.message);
                return Err(e);
            }
        };
        self.state.set(next);
        tracing::debug!(generation = ticket.generation(), "Password change submitted");

        let mut state = self.state;
        let latency = self.latency;
        let task = spawn(async move {
            settle_submission(latency, ticket, move |ticket| match state.try_write() {
                Ok(mut form) => form.complete_submit(ticket),
                Err(_) => false,
            })
            .await;
        });
        self.pending.set(Some(task));
        Ok(())
    }

    pub fn redirect(&self, navigator: &impl HostNavigator) -> Result<(), AppError> {
        let result = redirect_with(&self.state.peek(), navigator);
        if let Err(e) = &result {
            tracing::warn!(kind = %e.kind, "Redirect rejected: {}", e.message);
        }
        result
    }

    fn teardown(&mut self) {
        if let Ok(mut pending) = self.pending.try_write() {
            if let Some(task) = pending.take() {
                task.cancel();
            }
        }
        if let Ok(mut form) = self.state.try_write() {
            form.invalidate_pending();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shared_types::{AppErrorKind, Screen, LOGIN_DEEP_LINK};
    use std::cell::RefCell;
    use std::rc::Rc;

    const LATENCY: Duration = Duration::from_millis(1500);

    #[derive(Default)]
    struct RecordingNavigator {
        visited: RefCell<Vec<String>>,
    }

    impl HostNavigator for RecordingNavigator {
        fn navigate(&self, target: &str) {
            self.visited.borrow_mut().push(target.to_string());
        }
    }

    fn filled(password: &str, confirm: &str) -> FormState {
        let mut state = FormState::new();
        state.set_password(password);
        state.set_confirm_password(confirm);
        state
    }

    #[tokio::test(start_paused = true)]
    async fn latency_waits_full_duration() {
        let start = tokio::time::Instant::now();
        simulated_latency(LATENCY).await;
        assert!(start.elapsed() >= LATENCY);
    }

    #[tokio::test(start_paused = true)]
    async fn submission_stays_on_form_until_latency_elapses() {
        let state = Rc::new(RefCell::new(filled("abcdefgh", "abcdefgh")));
        let ticket = state.borrow_mut().begin_submit().unwrap();
        assert!(state.borrow().is_submitting());
        assert_eq!(state.borrow().screen(), Screen::Form);

        let shared = Rc::clone(&state);
        let settle = settle_submission(LATENCY, ticket, move |ticket| {
            shared.borrow_mut().complete_submit(ticket)
        });
        tokio::pin!(settle);

        let early = tokio::time::timeout(Duration::from_millis(1499), &mut settle).await;
        assert!(early.is_err());
        assert!(state.borrow().is_submitting());
        assert_eq!(state.borrow().screen(), Screen::Form);

        assert!(settle.await);
        assert_eq!(state.borrow().screen(), Screen::Success);
        assert!(!state.borrow().is_submitting());
    }

    #[tokio::test(start_paused = true)]
    async fn stale_completion_after_teardown_is_dropped() {
        let state = Rc::new(RefCell::new(filled("abcdefgh", "abcdefgh")));
        let ticket = state.borrow_mut().begin_submit().unwrap();
        state.borrow_mut().invalidate_pending();

        let shared = Rc::clone(&state);
        let applied = settle_submission(LATENCY, ticket, move |ticket| {
            shared.borrow_mut().complete_submit(ticket)
        })
        .await;

        assert!(!applied);
        assert_eq!(state.borrow().screen(), Screen::Form);
    }

    #[test]
    fn redirect_from_success_navigates_once() {
        let mut state = filled("abcdefgh", "abcdefgh");
        let ticket = state.begin_submit().unwrap();
        state.complete_submit(ticket);
        let before = state.clone();

        let navigator = RecordingNavigator::default();
        redirect_with(&state, &navigator).unwrap();

        assert_eq!(*navigator.visited.borrow(), vec![LOGIN_DEEP_LINK.to_string()]);
        assert_eq!(state, before);
    }

    #[test]
    fn redirect_before_success_is_rejected() {
        let state = filled("abcdefgh", "abcdefgh");
        let navigator = RecordingNavigator::default();

        let err = redirect_with(&state, &navigator).unwrap_err();

        assert_eq!(err.kind, AppErrorKind::InvalidState);
        assert!(navigator.visited.borrow().is_empty());
    }

    #[component]
    fn FlowHarness() -> Element {
        let flow = use_reset_flow(&FlowConfig::default());
        use_context_provider(|| flow);
        rsx! {}
    }

    fn mount() -> (VirtualDom, ResetFlow) {
        let mut dom = VirtualDom::new(FlowHarness);
        dom.rebuild_in_place();
        let flow = dom.in_scope(ScopeId::APP, consume_context::<ResetFlow>);
        (dom, flow)
    }

    fn snapshot(dom: &VirtualDom, flow: ResetFlow) -> FormState {
        dom.in_scope(ScopeId::APP, || FormState::clone(&flow.state().peek()))
    }

    /// Drive the dom's tasks until `duration` of (paused) time has passed.
    async fn run_for(dom: &mut VirtualDom, duration: Duration) {
        let deadline = tokio::time::Instant::now() + duration;
        loop {
            let woke = tokio::select! {
                _ = dom.wait_for_work() => true,
                _ = tokio::time::sleep_until(deadline) => false,
            };
            if !woke {
                break;
            }
            dom.render_immediate_to_vec();
        }
    }

    fn fill_and_submit(dom: &VirtualDom, mut flow: ResetFlow) -> Result<(), AppError> {
        dom.in_scope(ScopeId::APP, || {
            flow.set_password("abcdefgh".to_string());
            flow.set_confirm_password("abcdefgh".to_string());
            flow.submit()
        })
    }

    #[tokio::test(start_paused = true)]
    async fn hook_moves_to_success_after_latency() {
        let (mut dom, flow) = mount();
        fill_and_submit(&dom, flow).unwrap();

        let state = snapshot(&dom, flow);
        assert!(state.is_submitting());
        assert_eq!(state.screen(), Screen::Form);

        run_for(&mut dom, Duration::from_millis(1400)).await;
        let state = snapshot(&dom, flow);
        assert!(state.is_submitting());
        assert_eq!(state.screen(), Screen::Form);

        run_for(&mut dom, Duration::from_millis(200)).await;
        let state = snapshot(&dom, flow);
        assert_eq!(state.screen(), Screen::Success);
        assert!(!state.is_submitting());
    }

    #[tokio::test(start_paused = true)]
    async fn second_submit_is_rejected_and_leaves_state_alone() {
        let (dom, mut flow) = mount();
        fill_and_submit(&dom, flow).unwrap();
        let before = snapshot(&dom, flow);

        let err = dom.in_scope(ScopeId::APP, || flow.submit()).unwrap_err();

        assert_eq!(err.kind, AppErrorKind::SubmissionInProgress);
        assert_eq!(snapshot(&dom, flow), before);
    }

    #[tokio::test(start_paused = true)]
    async fn mismatched_submit_is_rejected_without_locking() {
        let (dom, mut flow) = mount();
        let err = dom
            .in_scope(ScopeId::APP, || {
                flow.set_password("abcdefgh".to_string());
                flow.set_confirm_password("abcdefg1".to_string());
                flow.submit()
            })
            .unwrap_err();

        assert_eq!(err.kind, AppErrorKind::PasswordsDoNotMatch);
        let state = snapshot(&dom, flow);
        assert!(!state.is_submitting());
        assert!(state.accepts_input());
        assert_eq!(state, filled("abcdefgh", "abcdefg1"));
    }

    #[tokio::test(start_paused = true)]
    async fn teardown_cancels_pending_completion() {
        let (mut dom, mut flow) = mount();
        fill_and_submit(&dom, flow).unwrap();
        run_for(&mut dom, Duration::from_millis(500)).await;

        dom.in_scope(ScopeId::APP, || flow.teardown());
        run_for(&mut dom, Duration::from_millis(2000)).await;

        let state = snapshot(&dom, flow);
        assert_eq!(state.screen(), Screen::Form);
        assert!(dom.in_scope(ScopeId::APP, || flow.pending.peek().is_none()));
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_dom_mid_submission_is_quiet() {
        let (mut dom, flow) = mount();
        fill_and_submit(&dom, flow).unwrap();
        run_for(&mut dom, Duration::from_millis(500)).await;

        drop(dom);
        tokio::time::sleep(Duration::from_millis(2000)).await;
    }
}
