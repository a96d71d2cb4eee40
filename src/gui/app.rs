use iced::widget::{button, column, container, image as image_view, text};
use iced::{Alignment, Element, Length, Task};

use super::{AppState, Message};

/// Launch the interactive window.
pub fn run() -> iced::Result {
    iced::application("Fruitspot - Fruit Detector & Classifier", update, view)
        .centered()
        .run()
}

fn update(state: &mut AppState, message: Message) -> Task<Message> {
    match message {
        Message::OpenImage => {
            let picked = rfd::FileDialog::new()
                .add_filter("images", &["png", "jpg", "jpeg", "bmp", "webp"])
                .pick_file();
            if let Some(path) = picked {
                state.load_and_process(&path);
            }
        }
    }
    Task::none()
}

fn view(state: &AppState) -> Element<'_, Message> {
    let mut content = column![
        text("Fruitspot").size(32),
        text("Open a fruit photo to detect and classify it."),
        button("Open image...").on_press(Message::OpenImage),
    ]
    .spacing(20)
    .padding(20)
    .align_x(Alignment::Center);

    if let Some(handle) = state.annotated_handle() {
        content = content.push(image_view(handle).width(Length::Fixed(480.0)));
    }

    if !state.summary().is_empty() {
        content = content.push(text(state.summary().to_string()));
    }

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}
