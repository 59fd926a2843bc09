use dioxus::prelude::*;

mod components;
mod state;

use components::{NewTodoInput, TodoRow};
use state::report;
use todo_list::TodoId;

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::launch(App);
}

/// Root component: the list, the input for new items and a count of what is left.
#[component]
fn App() -> Element {
    let mut todos = state::use_todo_list();

    let items = todos.read().items().to_vec();
    let editing = todos.read().editing();
    let remaining = todos.read().remaining();

    rsx! {
        document::Stylesheet { href: MAIN_CSS }
        main { class: "todo-app",
            ul { class: "todo-list",
                for item in items {
                    TodoRow {
                        key: "{item.id}",
                        editing: editing == Some(item.id),
                        item: item.clone(),
                        on_toggle: move |id: TodoId| report(todos.write().toggle(id)),
                        on_start_edit: move |id: TodoId| report(todos.write().start_editing(id)),
                        on_draft: move |text: String| report(todos.write().update_draft(&text)),
                        on_finish_edit: move |_| report(todos.write().finish_editing()),
                        on_cancel_edit: move |_| report(todos.write().cancel_editing()),
                        on_delete: move |id: TodoId| report(todos.write().delete(id)),
                    }
                }
            }
            NewTodoInput {
                editing: editing.is_some(),
                on_add: move |text: String| report(todos.write().add(&text)),
            }
            p { class: "todo-count", "{remaining} left" }
        }
    }
}
