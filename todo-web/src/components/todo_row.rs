use dioxus::prelude::*;
use todo_list::{TodoId, TodoItem};

/// One todo: checkbox, text (or an editor while `editing`), delete button.
#[component]
pub fn TodoRow(
    item: TodoItem,
    editing: bool,
    on_toggle: EventHandler<TodoId>,
    on_start_edit: EventHandler<TodoId>,
    on_draft: EventHandler<String>,
    on_finish_edit: EventHandler<()>,
    on_cancel_edit: EventHandler<()>,
    on_delete: EventHandler<TodoId>,
) -> Element {
    let id = item.id;
    let text_class = if item.completed {
        "todo-text completed"
    } else {
        "todo-text"
    };

    rsx! {
        li { class: "todo-row",
            input {
                r#type: "checkbox",
                checked: item.completed,
                onchange: move |_| on_toggle.call(id),
            }
            if editing {
                input {
                    class: "todo-edit",
                    value: "{item.text}",
                    autofocus: true,
                    oninput: move |evt: FormEvent| on_draft.call(evt.value()),
                    onblur: move |_| on_finish_edit.call(()),
                    onkeydown: move |evt: KeyboardEvent| match evt.key() {
                        Key::Enter => on_finish_edit.call(()),
                        Key::Escape => on_cancel_edit.call(()),
                        _ => {}
                    },
                }
            } else {
                span { class: text_class, onclick: move |_| on_start_edit.call(id), "{item.text}" }
            }
            button { class: "todo-delete", onclick: move |_| on_delete.call(id), "X" }
        }
    }
}
