use dioxus::prelude::*;

use quiz_core::model::UserId;

fn button_class(selected: bool) -> &'static str {
    if selected { "btn btn-primary" } else { "btn btn-secondary" }
}

/// Selection screen: one button per configured user.
#[component]
pub fn UserPicker(
    users: Vec<UserId>,
    current: Option<UserId>,
    on_select: EventHandler<UserId>,
) -> Element {
    rsx! {
        div { class: "user-picker",
            h3 { "Who is practicing?" }
            if users.is_empty() {
                p { class: "user-picker__empty", "No users configured." }
            }
            ul { class: "user-picker__list",
                for user in users {
                    li { key: "{user}",
                        button {
                            class: button_class(current.as_ref() == Some(&user)),
                            r#type: "button",
                            onclick: {
                                let user = user.clone();
                                move |_| on_select.call(user.clone())
                            },
                            "{user}"
                        }
                    }
                }
            }
        }
    }
}
