use dioxus::prelude::*;

/// Form wrapper that keeps submission inside the app.
///
/// The browser default (page reload) is always suppressed; `busy` marks
/// the form with `aria-busy` while a submission is outstanding.
#[component]
pub fn Form(
    #[props(default)] onsubmit: EventHandler<FormEvent>,
    #[props(default = false)] busy: bool,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    let base = vec![Attribute::new("class", "form", None, false)];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);
    let aria_busy = if busy { "true" } else { "false" };

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        form {
            "aria-busy": aria_busy,
            onsubmit: move |evt| {
                evt.prevent_default();
                onsubmit.call(evt);
            },
            ..merged,
            {children}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(app: fn() -> Element) -> String {
        let mut dom = VirtualDom::new(app);
        dom.rebuild_in_place();
        dioxus_ssr::render(&dom)
    }

    #[test]
    fn busy_form_is_marked() {
        fn app() -> Element {
            rsx! { Form { busy: true, "fields" } }
        }
        let html = render(app);
        assert!(html.contains("aria-busy=\"true\""));
        assert!(html.contains("fields"));
    }
}
