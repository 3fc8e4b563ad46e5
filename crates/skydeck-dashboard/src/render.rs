//! ANSI terminal renderer for a `View`.

use std::io::{self, Write};

use skydeck_store::Theme;
use skydeck_weather::{Backdrop, ParticleKind, Particles};

use crate::view::{ForecastPanel, View, WeatherPanel};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const CLEAR: &str = "\x1b[2J\x1b[H";

const PROMPT: &str = "Search a city, or type 'help' > ";
const STRIP_WIDTH: usize = 60;

/// Foreground colors for one theme/backdrop combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub accent: u8,
    pub text: u8,
    pub muted: u8,
}

impl Palette {
    pub fn for_view(theme: Theme, backdrop: Backdrop) -> Self {
        let accent = match backdrop {
            Backdrop::Plain => 32,
            Backdrop::Clear => 33,
            Backdrop::Clouds => 37,
            Backdrop::Rain => 34,
            Backdrop::Snow => 36,
            Backdrop::Thunderstorm => 35,
            Backdrop::Mist => 90,
        };

        if theme.is_dark() {
            Self {
                // bright variant of the accent
                accent: if accent < 90 { accent + 60 } else { 37 },
                text: 97,
                muted: 37,
            }
        } else {
            Self {
                accent,
                text: 30,
                muted: 90,
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct TerminalRenderer {
    /// Emit ANSI color codes
    pub color: bool,
    /// Clear the screen before each frame
    pub clear_screen: bool,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self {
            color: true,
            clear_screen: true,
        }
    }
}

impl TerminalRenderer {
    pub fn plain() -> Self {
        Self {
            color: false,
            clear_screen: false,
        }
    }

    pub fn render<W: Write>(&self, view: &View, out: &mut W) -> io::Result<()> {
        let palette = Palette::for_view(view.theme, view.backdrop);
        let mut frame = Frame {
            out,
            palette,
            color: self.color,
        };

        if self.clear_screen {
            frame.raw(CLEAR)?;
        }

        frame.header(view)?;

        if let Some(particles) = view.particles {
            let strip = particle_strip(particles, STRIP_WIDTH);
            frame.line(frame.palette.accent, &strip)?;
        }

        if view.loading {
            frame.line(frame.palette.muted, "Loading weather data...")?;
        }

        if let Some(message) = view.notice {
            frame.line(31, &format!("! {}  (type 'dismiss' to close)", message))?;
        }

        if let Some(panel) = &view.weather {
            frame.panel(panel)?;
        }

        if view.show_favorites() {
            frame.blank()?;
            frame.heading("Favorites")?;
            for (i, entry) in view.favorites.iter().enumerate() {
                frame.line(frame.palette.text, &format!("  {}. {}", i + 1, entry))?;
            }
        }

        if !view.popular_cities.is_empty() {
            frame.blank()?;
            let cities = view
                .popular_cities
                .iter()
                .enumerate()
                .map(|(i, c)| format!("{}. {}", i + 1, c))
                .collect::<Vec<_>>()
                .join("  ");
            frame.line(frame.palette.muted, &format!("Popular: {}", cities))?;
        }

        frame.blank()?;
        frame.raw(PROMPT)?;
        frame.out.flush()
    }

    /// Print a message under the current frame and re-prompt.
    pub fn render_note<W: Write>(&self, note: &str, out: &mut W) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "{}", note)?;
        out.write_all(PROMPT.as_bytes())?;
        out.flush()
    }
}

struct Frame<'a, W: Write> {
    out: &'a mut W,
    palette: Palette,
    color: bool,
}

impl<W: Write> Frame<'_, W> {
    fn raw(&mut self, text: &str) -> io::Result<()> {
        self.out.write_all(text.as_bytes())
    }

    fn blank(&mut self) -> io::Result<()> {
        writeln!(self.out)
    }

    fn line(&mut self, color: u8, text: &str) -> io::Result<()> {
        if self.color {
            writeln!(self.out, "\x1b[{}m{}{}", color, text, RESET)
        } else {
            writeln!(self.out, "{}", text)
        }
    }

    fn heading(&mut self, text: &str) -> io::Result<()> {
        if self.color {
            writeln!(
                self.out,
                "{}\x1b[{}m{}{}",
                BOLD, self.palette.accent, text, RESET
            )
        } else {
            writeln!(self.out, "{}", text)
        }
    }

    fn header(&mut self, view: &View) -> io::Result<()> {
        self.heading("Skydeck")?;
        let status = format!(
            "{}   [theme: {}] [{}]",
            view.clock,
            view.theme.as_str(),
            view.unit_label
        );
        self.line(self.palette.muted, &status)
    }

    fn panel(&mut self, panel: &WeatherPanel) -> io::Result<()> {
        let marker = if panel.is_favorite { " ★" } else { " ☆" };
        let text = self.palette.text;

        self.blank()?;
        self.heading(&format!("{}{}", panel.title, marker))?;
        self.line(self.palette.muted, &panel.coordinates)?;
        self.line(
            text,
            &format!(
                "[{}] {}  {}",
                panel.fallback_icon, panel.temperature, panel.description
            ),
        )?;
        self.line(text, &format!("Feels like {}", panel.feels_like))?;
        self.line(
            text,
            &format!(
                "Humidity {}   Wind {}   Visibility {}",
                panel.humidity, panel.wind, panel.visibility
            ),
        )?;
        self.line(
            text,
            &format!(
                "Pressure {}   UV {}   Precipitation {}",
                panel.pressure, panel.uv_index, panel.precipitation
            ),
        )?;
        self.line(self.palette.muted, &format!("Icon {}", panel.icon_url))?;

        if let Some(forecast) = &panel.forecast {
            self.forecast(forecast)?;
        }
        Ok(())
    }

    fn forecast(&mut self, forecast: &ForecastPanel) -> io::Result<()> {
        let text = self.palette.text;

        self.blank()?;
        self.heading("Next 24 hours")?;
        for cell in &forecast.hourly {
            self.line(
                text,
                &format!(
                    "  {:>5}  {:>5}  [{}] {}",
                    cell.label, cell.temperature, cell.fallback_icon, cell.condition
                ),
            )?;
        }

        self.blank()?;
        self.heading("5-day forecast")?;
        for cell in &forecast.daily {
            self.line(
                text,
                &format!(
                    "  {:<5}  {:>5} / {:<5}  [{}] {}",
                    cell.label, cell.high, cell.low, cell.fallback_icon, cell.description
                ),
            )?;
        }
        Ok(())
    }
}

/// One row of evenly spaced particle glyphs, denser for higher counts.
pub fn particle_strip(particles: Particles, width: usize) -> String {
    let glyph = match particles.kind {
        ParticleKind::Rain => '\'',
        ParticleKind::Snow => '*',
    };
    let marks = (particles.count * width / 200).clamp(1, width.max(1));

    let mut strip = vec![' '; width];
    for i in 0..marks {
        strip[i * width / marks] = glyph;
    }
    strip.into_iter().collect()
}
