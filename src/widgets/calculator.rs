//! Pocket calculator with pressable keys and a one-line screen.

use crate::{
    animation::compose::ComposeAnimation,
    foundation::core::{DEFAULT_BUFF, LEFT, Point, Rect, Rgba8, Size, UP, Vec2, union_all},
    foundation::error::{NinesError, NinesResult},
    scene::item::Item,
};

/// Key labels, row by row.
pub const KEY_LABELS: [&str; 20] = [
    "AC", "C", "M−", "M+", //
    "7", "8", "9", "÷", //
    "4", "5", "6", "×", //
    "1", "2", "3", "−", //
    "0", ".", "=", "+",
];

const ROWS: usize = 5;
const COLS: usize = 4;
const KEY_BUFF: f64 = 0.15;
const GRID_BUFF: f64 = DEFAULT_BUFF;
const KEY_LABEL_HEIGHT: f64 = 0.35;
/// Word keys ("AC", "M+", ...) are set smaller than symbol keys.
const WORD_KEY_SCALE: f64 = 0.75;

/// Run time of a single key tap, in seconds.
pub const TAP_RUN_TIME: f64 = 0.25;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CalculatorOpts {
    /// Minimum screen height; the screen is never shorter than a key.
    pub screen_height: Option<f64>,
    pub button_unpressed_color: Rgba8,
    pub button_pressed_color: Rgba8,
    pub label_unpressed_color: Rgba8,
    pub label_pressed_color: Rgba8,
    pub calculator_color: Rgba8,
    pub screen_color: Rgba8,
}

impl Default for CalculatorOpts {
    fn default() -> Self {
        Self {
            screen_height: None,
            button_unpressed_color: Rgba8::BLACK,
            button_pressed_color: Rgba8::PURPLE,
            label_unpressed_color: Rgba8::WHITE,
            label_pressed_color: Rgba8::BLACK,
            calculator_color: Rgba8::BLACK,
            screen_color: Rgba8::BLACK,
        }
    }
}

impl CalculatorOpts {
    pub fn validate(&self) -> NinesResult<()> {
        if let Some(h) = self.screen_height {
            if !h.is_finite() || h < 0.0 {
                return Err(NinesError::validation(format!(
                    "calculator screen_height must be finite and >= 0, got {h}"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Key {
    pub label: String,
    pub button: Item,
    pub text: Item,
    pub pressed: bool,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ScreenText {
    pub text: String,
    pub item: Item,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Calculator {
    pub enclosure: Item,
    pub screen: Item,
    pub keys: Vec<Key>,
    pub screen_text: Option<ScreenText>,
    #[serde(skip)]
    opts: CalculatorOpts,
}

fn is_word_key(label: &str) -> bool {
    label.chars().any(|c| c.is_ascii_alphabetic())
}

impl Calculator {
    pub fn new(opts: &CalculatorOpts) -> NinesResult<Self> {
        opts.validate()?;

        let texts: Vec<Item> = KEY_LABELS
            .iter()
            .map(|label| {
                let height = if is_word_key(label) {
                    KEY_LABEL_HEIGHT * WORD_KEY_SCALE
                } else {
                    KEY_LABEL_HEIGHT
                };
                Item::text_box(label, height).with_color(opts.label_unpressed_color)
            })
            .collect();
        let key_w = texts.iter().map(|t| t.size.width).fold(0.0, f64::max);
        let key_h = texts.iter().map(|t| t.size.height).fold(0.0, f64::max);
        let button_size = Size::new(key_w + 2.0 * KEY_BUFF, key_h + 2.0 * KEY_BUFF);

        // Grid centered on the origin.
        let grid_w = COLS as f64 * button_size.width + (COLS - 1) as f64 * GRID_BUFF;
        let grid_h = ROWS as f64 * button_size.height + (ROWS - 1) as f64 * GRID_BUFF;
        let step_x = button_size.width + GRID_BUFF;
        let step_y = button_size.height + GRID_BUFF;
        let first = Point::new(
            (button_size.width - grid_w) / 2.0,
            (grid_h - button_size.height) / 2.0,
        );
        let cell = |row: usize, col: usize| {
            first + Vec2::new(col as f64 * step_x, -(row as f64) * step_y)
        };

        let keys: Vec<Key> = KEY_LABELS
            .iter()
            .zip(texts)
            .enumerate()
            .map(|(i, (label, mut text))| {
                let center = cell(i / COLS, i % COLS);
                text.move_to(center);
                Key {
                    label: (*label).to_string(),
                    button: Item::new(center, button_size)
                        .with_color(opts.button_unpressed_color),
                    text,
                    pressed: false,
                }
            })
            .collect();

        let grid = Rect::new(-grid_w / 2.0, -grid_h / 2.0, grid_w / 2.0, grid_h / 2.0);
        let screen_h = button_size.height.max(opts.screen_height.unwrap_or(0.0));
        let mut screen =
            Item::new(Point::ORIGIN, Size::new(grid_w, screen_h)).with_color(opts.screen_color);
        screen.next_to(grid, UP, GRID_BUFF);

        let inside = union_all([grid, screen.bounds()]).unwrap_or(grid);
        let enclosure = Item::new(
            inside.center(),
            Size::new(
                inside.width() + 4.0 * KEY_BUFF,
                inside.height() + 4.0 * KEY_BUFF,
            ),
        )
        .with_color(opts.calculator_color);

        Ok(Self {
            enclosure,
            screen,
            keys,
            screen_text: None,
            opts: opts.clone(),
        })
    }

    pub fn bounds(&self) -> Rect {
        self.enclosure.bounds()
    }

    pub fn key(&self, label: &str) -> Option<&Key> {
        self.keys.iter().find(|k| k.label == label)
    }

    fn key_index(&self, label: &str) -> NinesResult<usize> {
        self.keys
            .iter()
            .position(|k| k.label == label)
            .ok_or_else(|| NinesError::validation(format!("unknown calculator key {label:?}")))
    }

    pub fn shift(&mut self, by: Vec2) -> &mut Self {
        self.enclosure.shift(by);
        self.screen.shift(by);
        for key in &mut self.keys {
            key.button.shift(by);
            key.text.shift(by);
        }
        if let Some(st) = &mut self.screen_text {
            st.item.shift(by);
        }
        self
    }

    fn set_pressed(&mut self, index: usize, pressed: bool) {
        let (button, label) = if pressed {
            (self.opts.button_pressed_color, self.opts.label_pressed_color)
        } else {
            (
                self.opts.button_unpressed_color,
                self.opts.label_unpressed_color,
            )
        };
        let key = &mut self.keys[index];
        key.pressed = pressed;
        key.button.color = button;
        key.text.color = label;
    }

    pub fn press_button(&mut self, label: &str) -> NinesResult<()> {
        let i = self.key_index(label)?;
        self.set_pressed(i, true);
        Ok(())
    }

    pub fn unpress_button(&mut self, label: &str) -> NinesResult<()> {
        let i = self.key_index(label)?;
        self.set_pressed(i, false);
        Ok(())
    }

    /// Replace the screen contents with `text`, right-aligned inside the screen.
    pub fn show_on_screen(&mut self, text: impl Into<String>) -> &mut Self {
        let text = text.into();
        let mut item =
            Item::text_box(&text, KEY_LABEL_HEIGHT).with_color(self.opts.label_unpressed_color);
        let screen = self.screen.bounds();
        item.move_to(Point::new(
            screen.x1 - item.size.width / 2.0,
            screen.center().y,
        ))
        .shift(LEFT * KEY_BUFF);
        self.screen_text = Some(ScreenText { text, item });
        self
    }

    /// Tap a single key.
    pub fn tap_animation<'a>(&'a mut self, label: &str) -> NinesResult<TapButtons<'a>> {
        self.taps_animation(&[label])
    }

    /// Tap keys one after another, [`TAP_RUN_TIME`] each. A key is held for the first half of
    /// its tap.
    pub fn taps_animation<'a>(&'a mut self, labels: &[&str]) -> NinesResult<TapButtons<'a>> {
        let indices = labels
            .iter()
            .map(|l| self.key_index(l))
            .collect::<NinesResult<Vec<_>>>()?;
        let mut anim = ComposeAnimation::new(self).matching_weights();
        for index in indices {
            anim.register(TAP_RUN_TIME, move |calc: &mut &'a mut Calculator, t| {
                calc.set_pressed(index, t < 0.5);
                Ok(())
            });
        }
        Ok(anim)
    }
}

pub type TapButtons<'a> = ComposeAnimation<'a, &'a mut Calculator>;

#[cfg(test)]
#[path = "../../tests/unit/widgets/calculator.rs"]
mod tests;
