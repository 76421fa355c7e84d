use crate::session::Event;

// Ticks a side button must stay pressed before it scrolls on its own.
pub const FAST_SEEK_DELAY: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    LeftPress,
    RightPress,
    BothPress,
    Release,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

/// Turns a side button held down into repeated fast seeks.
///
/// Once both sides are down the press is a confirm chord and stays one until
/// the buttons are released, whichever side went down first.
#[derive(Debug, Default)]
pub struct ButtonHold {
    pressed: Option<Side>,
    chord: bool,
    ticks: u8,
}

impl ButtonHold {
    pub fn update(&mut self, button: Button) {
        let side = match button {
            Button::LeftPress => Side::Left,
            Button::RightPress => Side::Right,
            Button::BothPress => return self.start_chord(),
            Button::Release => {
                *self = Self::default();
                return;
            }
        };
        match self.pressed {
            _ if self.chord => {}
            Some(held) if held != side => self.start_chord(),
            // A repeated press of the held side keeps counting.
            Some(_) => {}
            None => {
                self.pressed = Some(side);
                self.ticks = 0;
            }
        }
    }

    fn start_chord(&mut self) {
        self.chord = true;
        self.pressed = None;
        self.ticks = 0;
    }

    pub fn tick(&mut self) -> Option<Event> {
        let side = self.pressed?;
        if self.ticks < FAST_SEEK_DELAY {
            self.ticks += 1;
            return None;
        }
        match side {
            Side::Left => Some(Event::SeekLeftFast),
            Side::Right => Some(Event::SeekRightFast),
        }
    }
}
