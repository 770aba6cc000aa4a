#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

use dioxus::prelude::*;

use quiz_core::model::UserId;

use super::UserPicker;
use crate::context::AppContext;
use crate::vm::{QuizIntent, QuizScreen, QuizVm};

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let quiz = ctx.quiz();

    let mut snapshot = use_signal({
        let quiz = quiz.clone();
        move || quiz.snapshot()
    });
    let mut switching = use_signal(|| false);
    let loading = use_signal(|| None::<UserId>);

    let dispatch_intent = {
        let quiz = quiz.clone();
        use_callback(move |intent: QuizIntent| match intent {
            QuizIntent::SelectUser(user) => {
                let quiz = quiz.clone();
                let mut loading = loading;
                let mut snapshot = snapshot;
                switching.set(false);
                loading.set(Some(user.clone()));
                spawn(async move {
                    let result = quiz.select_user(user.clone()).await;
                    // A newer selection owns the screen now.
                    if result.as_ref().is_err_and(services::QuizError::is_superseded) {
                        return;
                    }
                    let settled = *loading.peek() == Some(user.clone());
                    if settled {
                        loading.set(None);
                    }
                    snapshot.set(quiz.snapshot());
                });
            }
            QuizIntent::Input(text) => snapshot.set(quiz.set_input_text(text)),
            QuizIntent::Confirm => {
                if let Ok(next) = quiz.confirm() {
                    snapshot.set(next);
                }
            }
            QuizIntent::SwitchUser => switching.set(true),
        })
    };

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<QuizTestHandles>() {
                handles.register(dispatch_intent);
            }
        }
    }

    let vm = QuizVm::new(snapshot.read().clone())
        .with_switching(switching())
        .with_loading(loading.read().clone());
    let heading = vm.heading(ctx.title());
    let users = ctx.users().to_vec();
    let current_user = vm.user().cloned();
    let failure_label = vm.failure_label().unwrap_or_default();
    let failure_detail = vm
        .failure()
        .map(|failure| failure.message.clone())
        .unwrap_or_default();
    let retry_user = vm.failure().map(|failure| failure.user.clone());

    rsx! {
        div { class: "page quiz-page",
            header { class: "quiz-page__header",
                h2 { class: "quiz-page__title", "{heading}" }
                if current_user.is_some() && vm.screen() != QuizScreen::SelectUser {
                    button {
                        class: "btn btn-secondary",
                        id: "quiz-switch-user",
                        r#type: "button",
                        onclick: move |_| dispatch_intent.call(QuizIntent::SwitchUser),
                        "Switch user"
                    }
                }
            }
            match vm.screen() {
                QuizScreen::SelectUser => rsx! {
                    UserPicker {
                        users,
                        current: current_user,
                        on_select: move |user: UserId| {
                            dispatch_intent.call(QuizIntent::SelectUser(user));
                        },
                    }
                },
                QuizScreen::Loading => rsx! {
                    p { class: "quiz-page__loading", "{vm.loading_label()}" }
                },
                QuizScreen::Failed => rsx! {
                    div { class: "quiz-page__error", role: "alert",
                        p { "{failure_label}" }
                        if !failure_detail.is_empty() {
                            pre { class: "quiz-page__error-detail", "{failure_detail}" }
                        }
                        if let Some(user) = retry_user {
                            button {
                                class: "btn btn-primary",
                                id: "quiz-retry",
                                r#type: "button",
                                onclick: move |_| {
                                    dispatch_intent.call(QuizIntent::SelectUser(user.clone()));
                                },
                                "Retry"
                            }
                        }
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: move |_| dispatch_intent.call(QuizIntent::SwitchUser),
                            "Choose another user"
                        }
                    }
                },
                QuizScreen::Completed => rsx! {
                    div { class: "quiz-page__complete",
                        p { "{vm.completion_message()}" }
                        p { class: "quiz-page__progress", "{vm.progress_label()}" }
                    }
                },
                QuizScreen::Question => rsx! {
                    div { class: "quiz-card",
                        p { class: "quiz-card__progress", "{vm.progress_label()}" }
                        h1 { class: "quiz-card__term", "{vm.term()}" }
                        if let Some(phonetic) = vm.phonetic() {
                            p { class: "quiz-card__phonetic", "{phonetic}" }
                        }
                        if let Some(example) = vm.example() {
                            p { class: "quiz-card__example", "{example}" }
                        }
                        input {
                            class: "quiz-card__input",
                            id: "quiz-input",
                            r#type: "text",
                            placeholder: "Type the translation",
                            value: "{vm.input_text()}",
                            oninput: move |evt| {
                                dispatch_intent.call(QuizIntent::Input(evt.value()));
                            },
                        }
                        if let Some(answer) = vm.answer() {
                            p { class: "quiz-card__answer", "{answer}" }
                        }
                        button {
                            class: "btn btn-primary",
                            id: "quiz-confirm",
                            r#type: "button",
                            onclick: move |_| dispatch_intent.call(QuizIntent::Confirm),
                            "Confirm"
                        }
                    }
                },
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    dispatch: Rc<RefCell<Option<Callback<QuizIntent>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<QuizIntent>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
    }

    pub(crate) fn dispatch(&self) -> Callback<QuizIntent> {
        (*self.dispatch.borrow()).expect("quiz dispatch registered")
    }
}
