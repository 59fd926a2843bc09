use dioxus::prelude::*;
use std::rc::Rc;

/// Text box for new todos. Submits on Enter or when focus leaves it, and takes
/// focus back whenever no item is being edited.
#[component]
pub fn NewTodoInput(editing: ReadOnlySignal<bool>, on_add: EventHandler<String>) -> Element {
    let mut draft = use_signal(String::new);
    let mut element = use_signal(|| None::<Rc<MountedData>>);

    use_effect(move || {
        if editing() {
            return;
        }
        if let Some(element) = element() {
            spawn(async move {
                if let Err(e) = element.set_focus(true).await {
                    tracing::debug!("Cannot focus new todo input: {e:?}");
                }
            });
        }
    });

    let mut submit = move || {
        on_add.call(draft());
        draft.set(String::new());
    };

    rsx! {
        input {
            class: "new-todo",
            placeholder: "Add a new todo",
            autofocus: true,
            value: "{draft}",
            onmounted: move |evt: MountedEvent| element.set(Some(evt.data())),
            oninput: move |evt: FormEvent| draft.set(evt.value()),
            onblur: move |_| submit(),
            onkeydown: move |evt: KeyboardEvent| {
                if evt.key() == Key::Enter {
                    submit();
                }
            },
        }
    }
}
