//! PCD8544 demo firmware
//!
//! Drives a Nokia 5110 LCD from an STM32F042K6: a title, a contrast
//! readout, an animated bar graph and an uptime counter. The button on
//! PA1 steps the contrast; a long press restores the default.

#![no_std]
#![no_main]

mod lcd;

use core::fmt::Write;

use defmt::*;
use embassy_executor::Spawner;
use embassy_futures::select::{select, Either};
use embassy_stm32::bind_interrupts;
use embassy_stm32::exti::{self, ExtiInput};
use embassy_stm32::gpio::{Level, Output, Pull, Speed};
use embassy_stm32::spi::{self, Spi};
use embassy_stm32::time::Hertz;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::{Duration, Ticker, Timer};
use heapless::String;
use pcd8544::{Config, FrameProgress, Pcd8544, PixelMode, Transport, TEXT_COLUMNS, WIDTH};
use {defmt_rtt as _, panic_probe as _};

use crate::lcd::BoardTransport;

bind_interrupts!(struct Irqs {
    EXTI0_1 => exti::InterruptHandler<embassy_stm32::interrupt::typelevel::EXTI0_1>;
});

/// The PCD8544 accepts up to 4 Mbit/s
const SPI_FREQUENCY_HZ: u32 = 4_000_000;

/// Period of the stepped background refresh
const REFRESH_TICK_MS: u64 = 250;

/// Background refresh spreads one full frame over this many ticks
const FULL_REFRESH_STEPS: u8 = 6;

const CONTRAST_STEP: u8 = 4;

const BAR_COUNT: usize = 8;
const BAR_WIDTH: u8 = 6;
const BAR_SCALE: u8 = 2;

/// One period of a coarse sine, in bar units
const WAVE: [u8; 8] = [5, 8, 9, 8, 5, 2, 1, 2];

/// Row the separator line is drawn on
const SEPARATOR_Y: u8 = 17;

/// Things the render loop reacts to
#[derive(Debug, Clone, Copy, defmt::Format)]
enum UiEvent {
    /// Seconds since boot
    Tick(u32),
    /// New contrast (Vop) value
    Contrast(u8),
}

static UI_EVENTS: Channel<CriticalSectionRawMutex, UiEvent, 4> = Channel::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("PCD8544 demo firmware starting...");

    let p = embassy_stm32::init(Default::default());

    // SPI1: PA5 = SCK, PA7 = MOSI (the panel has no output)
    let mut spi_config = spi::Config::default();
    spi_config.frequency = Hertz(SPI_FREQUENCY_HZ);
    let spi = Spi::new_blocking_txonly(p.SPI1, p.PA5, p.PA7, spi_config);

    let transport = BoardTransport::new(
        spi,
        Output::new(p.PA4, Level::High, Speed::Low), // CE, active low
        Output::new(p.PB0, Level::Low, Speed::Low),  // D/C
        Output::new(p.PB1, Level::High, Speed::Low), // RST, active low
    );

    let mut display = Pcd8544::new(transport);
    match display.init() {
        Ok(()) => info!("LCD initialized"),
        Err(e) => error!("Failed to initialize LCD: {:?}", e),
    }

    draw_static(&mut display);

    let button = ExtiInput::new(p.PA1, p.EXTI1, Pull::Up, Irqs);

    spawner.spawn(uptime_task()).unwrap();
    spawner.spawn(button_task(button)).unwrap();

    info!("Tasks spawned, entering render loop");

    let mut refresh = Ticker::every(Duration::from_millis(REFRESH_TICK_MS));
    loop {
        match select(UI_EVENTS.receive(), refresh.next()).await {
            Either::First(event) => {
                if let Err(e) = render(&mut display, event) {
                    warn!("Render of {:?} failed: {:?}", event, e);
                    continue;
                }
                if let Err(e) = display.update() {
                    warn!("LCD update failed: {:?}", e);
                }
            }
            Either::Second(()) => match display.full_update(FULL_REFRESH_STEPS) {
                Ok(FrameProgress::Complete) => trace!("Background refresh complete"),
                Ok(FrameProgress::InProgress { .. }) => {}
                Err(e) => warn!("Background refresh failed: {:?}", e),
            },
        }
    }
}

/// Title, contrast readout and separator above the bar graph
fn draw_static<T: Transport>(display: &mut Pcd8544<T>) {
    display.goto_text_position(1, 0);
    display.put_str("Nokia  5110");
    display.draw_line(0, SEPARATOR_Y, WIDTH as u8 - 1, SEPARATOR_Y, PixelMode::On);
    let contrast = display.config().contrast;
    show_contrast(display, contrast);
}

fn show_contrast<T: Transport>(display: &mut Pcd8544<T>, value: u8) {
    let mut line: String<TEXT_COLUMNS> = String::new();
    // 11 characters always fit the row
    let _ = write!(line, "Vop 0x{:02X}   ", value);
    display.goto_text_position(0, 1);
    display.put_str(&line);
}

fn render<T: Transport>(display: &mut Pcd8544<T>, event: UiEvent) -> Result<(), T::Error> {
    match event {
        UiEvent::Tick(seconds) => {
            let mut line: String<TEXT_COLUMNS> = String::new();
            let _ = write!(line, "Up {:>8}s", seconds);
            display.goto_text_position(0, 5);
            display.put_str(&line);

            let phase = (seconds as usize) % WAVE.len();
            let bars: [u8; BAR_COUNT] = core::array::from_fn(|i| WAVE[(i + phase) % WAVE.len()]);
            // Bars blank their columns up to the top edge, header included
            display.draw_bars(&bars, BAR_WIDTH, BAR_SCALE);
            draw_static(display);
        }
        UiEvent::Contrast(value) => {
            display.set_contrast(value)?;
            show_contrast(display, value);
        }
    }
    Ok(())
}

/// Once-a-second uptime counter
#[embassy_executor::task]
async fn uptime_task() {
    info!("Uptime task started");

    let mut ticker = Ticker::every(Duration::from_secs(1));
    let mut seconds: u32 = 0;
    loop {
        ticker.next().await;
        seconds = seconds.wrapping_add(1);
        UI_EVENTS.send(UiEvent::Tick(seconds)).await;
    }
}

/// Contrast button task
#[embassy_executor::task]
async fn button_task(mut btn: ExtiInput<'static>) {
    info!("Button task started");

    let default_contrast = Config::default().contrast;
    let mut contrast = default_contrast;

    loop {
        btn.wait_for_falling_edge().await;

        // Debounce
        Timer::after(Duration::from_millis(20)).await;
        if !btn.is_low() {
            continue;
        }

        let long_press =
            embassy_time::with_timeout(Duration::from_millis(500), btn.wait_for_rising_edge())
                .await;

        match long_press {
            Ok(()) => {
                contrast = (contrast + CONTRAST_STEP) & pcd8544::command::MAX_VOP;
                debug!("Button: contrast {=u8:#x}", contrast);
            }
            Err(_) => {
                contrast = default_contrast;
                debug!("Button: contrast reset");
                btn.wait_for_rising_edge().await;
            }
        }
        UI_EVENTS.send(UiEvent::Contrast(contrast)).await;

        // Debounce after release
        Timer::after(Duration::from_millis(50)).await;
    }
}
