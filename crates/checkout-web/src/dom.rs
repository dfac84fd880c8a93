//! DOM bindings for the checkout trigger

use std::rc::Rc;

use async_trait::async_trait;
use checkout_core::{
    Browser, CheckoutConfig, CheckoutError, CheckoutTransport, CheckoutTrigger,
    ENDPOINT_ATTRIBUTE, FormHost, FormPayload, HttpTransport, PUBLISHABLE_KEY_ATTRIBUTE, Result,
    Submission, locate_form,
};
use wasm_bindgen::{JsCast, JsValue, closure::Closure};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Event, File, FormData, HtmlFormElement, Window};

/// Document lookup for the upload form
struct DomPage(Document);

impl FormHost for DomPage {
    type Form = HtmlFormElement;

    fn find_form(&self, id: &str) -> Option<HtmlFormElement> {
        let element = self.0.get_element_by_id(id)?;
        match element.dyn_into::<HtmlFormElement>() {
            Ok(form) => Some(form),
            Err(_) => {
                log::warn!("#{id} is not a <form>, checkout trigger not attached");
                None
            }
        }
    }
}

/// Navigation and alerts through `window`
pub struct WindowBrowser(Window);

impl Browser for WindowBrowser {
    fn page_url(&self) -> Result<String> {
        self.0
            .location()
            .href()
            .map_err(|e| CheckoutError::Browser(describe(&e)))
    }

    fn navigate(&self, url: &str) -> Result<()> {
        self.0
            .location()
            .set_href(url)
            .map_err(|e| CheckoutError::Browser(describe(&e)))
    }

    fn alert(&self, message: &str) {
        if let Err(e) = self.0.alert_with_message(message) {
            log::error!("alert failed: {}", describe(&e));
        }
    }
}

/// A submit event on the upload form
struct DomSubmission {
    event: Event,
    form: HtmlFormElement,
}

#[async_trait(?Send)]
impl Submission for DomSubmission {
    fn prevent_default(&self) {
        self.event.prevent_default();
    }

    async fn collect(&self) -> Result<FormPayload> {
        let data = FormData::new_with_form(&self.form)
            .map_err(|e| CheckoutError::Payload(describe(&e)))?;
        let entries = js_sys::try_iter(data.as_ref())
            .map_err(|e| CheckoutError::Payload(describe(&e)))?
            .ok_or_else(|| CheckoutError::Payload("FormData is not iterable".into()))?;

        let mut payload = FormPayload::new();
        for entry in entries {
            let entry = entry.map_err(|e| CheckoutError::Payload(describe(&e)))?;
            let entry = js_sys::Array::from(&entry);
            let name = entry.get(0).as_string().unwrap_or_default();
            let value = entry.get(1);

            if let Some(text) = value.as_string() {
                payload.push_text(name, text);
                continue;
            }

            let file: File = value.dyn_into().map_err(|_| {
                CheckoutError::Payload(format!("field {name:?} is neither text nor a file"))
            })?;
            let buffer = JsFuture::from(file.array_buffer())
                .await
                .map_err(|e| CheckoutError::Payload(describe(&e)))?;
            let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
            payload.push_file(name, file.name(), file.type_(), bytes);
        }
        Ok(payload)
    }
}

/// Run `init` once the document has been parsed.
pub fn when_ready(window: Window, init: impl FnOnce(Window) + 'static) -> Result<()> {
    let document = window
        .document()
        .ok_or_else(|| CheckoutError::Browser("window has no document".into()))?;

    if document.ready_state() != "loading" {
        init(window);
        return Ok(());
    }

    let callback = Closure::once_into_js(move || init(window));
    document
        .add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())
        .map_err(|e| CheckoutError::Browser(describe(&e)))
}

/// Attach the submit interceptor to the upload form.
///
/// Returns `Ok(false)` when the page has no upload form.
pub fn install(window: &Window) -> Result<bool> {
    let document = window
        .document()
        .ok_or_else(|| CheckoutError::Browser("window has no document".into()))?;

    let defaults = CheckoutConfig::default();
    let Some(form) = locate_form(&DomPage(document), &defaults) else {
        return Ok(false);
    };

    let config = defaults.with_overrides(
        form.get_attribute(ENDPOINT_ATTRIBUTE),
        form.get_attribute(PUBLISHABLE_KEY_ATTRIBUTE),
    );
    log::info!(
        "Checkout trigger attached to #{} (endpoint {}, {:?} key {})",
        config.form_id,
        config.endpoint,
        config.publishable_key.mode(),
        config.publishable_key,
    );

    let trigger = CheckoutTrigger::new(
        config,
        HttpTransport::new(),
        WindowBrowser(window.clone()),
    );
    attach(&form, Rc::new(trigger))?;

    Ok(true)
}

/// Register the submit listener that hands every submission to `trigger`.
fn attach<T, B>(form: &HtmlFormElement, trigger: Rc<CheckoutTrigger<T, B>>) -> Result<()>
where
    T: CheckoutTransport + 'static,
    B: Browser + 'static,
{
    let target = form.clone();
    let on_submit = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        // Must happen during dispatch; the spawned future only runs afterwards.
        event.prevent_default();

        let trigger = Rc::clone(&trigger);
        let submission = DomSubmission {
            event,
            form: target.clone(),
        };
        wasm_bindgen_futures::spawn_local(async move {
            let outcome = trigger.handle_submit(&submission).await;
            log::debug!("submit finished: {outcome:?}");
        });
    });

    form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())
        .map_err(|e| CheckoutError::Browser(describe(&e)))?;
    // The listener lives as long as the page.
    on_submit.forget();

    Ok(())
}

fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}
