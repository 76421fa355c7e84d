#![no_std]
#![no_main]

use ledger_device_sdk::io;
use ledger_secure_sdk_sys::buttons::ButtonEvent;
use sia_utils::hold::{Button, ButtonHold};
use sia_utils::session::{Event, Response, Screen};

use crate::debug::print::println;
use crate::error_code::StatusWord;
use crate::handler::{handle_apdu, send_payload, Ins, Session};
use crate::signer::DeviceSigner;
use crate::ui::{home::MainPages, reviewer::ScreenReviewer};

mod blake2b_hasher;
mod debug;
mod error_code;
mod handler;
mod signer;
mod ui;

ledger_device_sdk::set_panic!(ledger_device_sdk::exiting_panic);

#[no_mangle]
extern "C" fn sample_main() {
    let mut comm = io::Comm::new();
    let mut session = Session::new(cfg!(feature = "replay-protection"));
    let mut reviewer = ScreenReviewer;
    let mut signer = DeviceSigner;
    let mut main_pages = MainPages::new();
    let mut hold = ButtonHold::default();

    loop {
        // The menu owns the buttons unless a review is on screen.
        let event = if session.is_reviewing() {
            comm.next_event::<Ins>()
        } else {
            main_pages.show(&mut comm)
        };

        match event {
            io::Event::Command(ins) => {
                println("command");
                match handle_apdu(&mut comm, ins, &mut session, &mut reviewer) {
                    Ok(response) => reply(&mut comm, response),
                    Err(sw) => comm.reply(sw),
                }
            }
            io::Event::Button(button) => {
                if let Some(button) = hold_button(&button) {
                    hold.update(button);
                }
                let Some(event) = review_event(session.screen(), &button) else {
                    continue;
                };
                dispatch(&mut comm, &mut session, event, &mut reviewer, &mut signer);
            }
            io::Event::Ticker if session.is_reviewing() => {
                let Some(event) = hold.tick() else {
                    continue;
                };
                dispatch(&mut comm, &mut session, event, &mut reviewer, &mut signer);
            }
            _ => continue,
        }

        if !session.is_reviewing() {
            main_pages.show_ui();
        }
    }
}

fn dispatch(
    comm: &mut io::Comm,
    session: &mut Session,
    event: Event,
    reviewer: &mut ScreenReviewer,
    signer: &mut DeviceSigner,
) {
    match session.handle_event(event, reviewer, signer) {
        // The comparison screen was dismissed, its digest is already sent.
        Ok(Response::Done) => {}
        Ok(response) => {
            send_payload(comm, &response);
            reply(comm, response);
        }
        Err(code) => comm.reply(StatusWord::from(code)),
    }
}

fn reply(comm: &mut io::Comm, response: Response) {
    match response {
        // The host stays blocked until the user acts.
        Response::Deferred => {}
        Response::MoreData | Response::Digest(_) | Response::Signature(_) | Response::Done => {
            comm.reply_ok()
        }
    }
}

fn hold_button(button: &ButtonEvent) -> Option<Button> {
    match button {
        ButtonEvent::LeftButtonPress => Some(Button::LeftPress),
        ButtonEvent::RightButtonPress => Some(Button::RightPress),
        ButtonEvent::BothButtonsPress => Some(Button::BothPress),
        ButtonEvent::LeftButtonRelease
        | ButtonEvent::RightButtonRelease
        | ButtonEvent::BothButtonsRelease => Some(Button::Release),
        #[allow(unreachable_patterns)]
        _ => None,
    }
}

// On the approval screen the buttons answer the question, elsewhere they scroll
// and both together move on.
fn review_event(screen: Screen, button: &ButtonEvent) -> Option<Event> {
    match (screen, button) {
        (Screen::Approval, ButtonEvent::LeftButtonRelease) => Some(Event::Reject),
        (Screen::Approval, ButtonEvent::RightButtonRelease) => Some(Event::Confirm),
        (_, ButtonEvent::LeftButtonRelease) => Some(Event::SeekLeft),
        (_, ButtonEvent::RightButtonRelease) => Some(Event::SeekRight),
        (_, ButtonEvent::BothButtonsRelease) => Some(Event::Confirm),
        _ => None,
    }
}
