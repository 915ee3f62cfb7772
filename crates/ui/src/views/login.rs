use dioxus::prelude::*;
use dioxus_router::use_navigator;
use services::RequestGate;
use tracing::debug;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::ViewError;

/// Phone-number sign-in for students on the eligibility list.
#[component]
pub fn LoginView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();

    let gate = use_hook(RequestGate::new);
    use_drop({
        let gate = gate.clone();
        move || gate.teardown()
    });

    let mut phone = use_signal(String::new);
    let mut error = use_signal(|| None::<ViewError>);
    let mut checking = use_signal(|| false);

    let cached = {
        let login = ctx.login();
        use_resource(move || {
            let login = login.clone();
            async move { login.cached_student().await.map_err(ViewError::from) }
        })
    };

    use_effect(move || {
        if let Some(Ok(Some(_))) = &*cached.value().read() {
            navigator.replace(Route::Questions {});
        }
    });

    let on_submit = {
        let login = ctx.login();
        move |evt: FormEvent| {
            evt.prevent_default();
            let Ok(token) = gate.begin() else {
                debug!("phone check already running");
                return;
            };
            checking.set(true);
            let login = login.clone();
            let raw = phone();
            spawn(async move {
                let result = login.check_phone(&raw).await;
                let Some(result) = token.finish(result) else {
                    return;
                };
                checking.set(false);
                match result {
                    Ok(_) => {
                        error.set(None);
                        navigator.push(Route::Questions {});
                    }
                    Err(err) => error.set(Some(ViewError::from(err))),
                }
            });
        }
    };

    rsx! {
        section { class: "login",
            h2 { "أدخل رقم هاتفك للمتابعة" }
            form { onsubmit: on_submit,
                input {
                    r#type: "tel",
                    placeholder: "05XXXXXXXX",
                    title: "رقم الجوال يبدأ بـ 05 ويتكون من 10 أرقام",
                    value: "{phone}",
                    oninput: move |evt| phone.set(evt.value()),
                }
                button {
                    r#type: "submit",
                    disabled: checking(),
                    if checking() { "⏳ جاري التحقق..." } else { "دخول 🚀" }
                }
            }
            if let Some(err) = error() {
                p { class: "error", "{err.message()}" }
            }
        }
    }
}
