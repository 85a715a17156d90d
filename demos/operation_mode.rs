//! MMA8451 Operation Mode Demo
//!
//! Cycles the sensor between standby and active mode while polling
//! acceleration. In standby the output registers hold their last values.
//!
//! # Hardware
//! - MMA8451 I2C address: 0x1D (SA0 high)
//! - SDA: GPIO 4, SCL: GPIO 5
//!
//! # Usage
//! ```bash
//! cargo build --example operation_mode --features "pico2_w usb_serial" \
//!     --target thumbv8m.main-none-eabihf
//! screen /dev/ttyACM0 115200
//! ```

#![no_std]
#![no_main]

use core::ptr::addr_of_mut;
use embassy_executor::Spawner;
use embassy_rp as hal;
use embassy_rp::i2c::I2c;
use embassy_rp::usb::{Driver, InterruptHandler as UsbInterruptHandler};
use embassy_time::{Duration, Timer};
use embassy_usb::class::cdc_acm::{CdcAcmClass, State};
use embassy_usb::{Builder, Config};
use panic_halt as _;

use embedded_alloc::LlffHeap as Heap;

use mma8451::logging::usb_logger_task;
use mma8451::{log_error, log_info, Mma8451Config, Mma8451Driver, OperationMode};

#[global_allocator]
static HEAP: Heap = Heap::empty();

const HEAP_SIZE: usize = 8 * 1024;

hal::bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => UsbInterruptHandler<hal::peripherals::USB>;
    I2C0_IRQ => embassy_rp::i2c::InterruptHandler<hal::peripherals::I2C0>;
});

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    // Initialize heap (the log macros format into alloc strings)
    {
        static mut HEAP_MEM: [u8; HEAP_SIZE] = [0; HEAP_SIZE];
        unsafe {
            HEAP.init(addr_of_mut!(HEAP_MEM) as *mut u8 as usize, HEAP_SIZE);
        }
    }

    let p = hal::init(Default::default());

    // Initialize USB Serial
    let driver = Driver::new(p.USB, Irqs);

    let mut usb_config = Config::new(0x2e8a, 0x000a);
    usb_config.manufacturer = Some("NXP");
    usb_config.product = Some("MMA8451 Operation Mode Demo");
    usb_config.serial_number = Some("12345678");
    usb_config.max_power = 100;
    usb_config.max_packet_size_0 = 64;

    static mut CONFIG_DESCRIPTOR: [u8; 256] = [0; 256];
    static mut BOS_DESCRIPTOR: [u8; 256] = [0; 256];
    static mut CONTROL_BUF: [u8; 64] = [0; 64];
    static mut MSOS_DESCRIPTOR: [u8; 256] = [0; 256];
    static mut STATE: State = State::new();

    let mut builder = Builder::new(
        driver,
        usb_config,
        unsafe { &mut *addr_of_mut!(CONFIG_DESCRIPTOR) },
        unsafe { &mut *addr_of_mut!(BOS_DESCRIPTOR) },
        unsafe { &mut *addr_of_mut!(MSOS_DESCRIPTOR) },
        unsafe { &mut *addr_of_mut!(CONTROL_BUF) },
    );

    let cdc = CdcAcmClass::new(&mut builder, unsafe { &mut *addr_of_mut!(STATE) }, 64);
    let usb = builder.build();

    spawner.spawn(usb_task(usb)).unwrap();
    spawner.spawn(usb_logger_task(cdc)).unwrap();

    // Wait for USB
    Timer::after(Duration::from_secs(2)).await;

    // Initialize I2C0 (GPIO 4 = SDA, GPIO 5 = SCL)
    let i2c = I2c::new_async(p.I2C0, p.PIN_5, p.PIN_4, Irqs, {
        let mut config = embassy_rp::i2c::Config::default();
        config.frequency = 400_000;
        config
    });

    let mut mma = match Mma8451Driver::new_initialized(i2c, Mma8451Config::default()).await {
        Ok(driver) => driver,
        Err(e) => {
            log_error!("Failed to find MMA8451: {}", e);
            loop {
                Timer::after(Duration::from_secs(1)).await;
            }
        }
    };

    if let Err(e) = mma.set_operation_mode(OperationMode::Standby).await {
        log_error!("Failed to set operation mode: {}", e);
    }

    const MODES: [OperationMode; 2] = [OperationMode::Standby, OperationMode::Active];

    loop {
        for mode in MODES {
            match mma.operation_mode().await {
                Ok(current) => log_info!("Current Operation mode setting: {:?}", current),
                Err(e) => log_error!("Readback failed: {}", e),
            }

            for _ in 0..10 {
                match mma.read_acceleration().await {
                    Ok(accel) => {
                        log_info!(
                            "Acceleration: X={:.1}m/s^2 y={:.1}m/s^2 z={:.1}m/s^2",
                            accel.x,
                            accel.y,
                            accel.z
                        );
                    }
                    Err(e) => log_error!("Read failed: {}", e),
                }
                Timer::after(Duration::from_millis(500)).await;
            }

            if let Err(e) = mma.set_operation_mode(mode).await {
                log_error!("Failed to set operation mode: {}", e);
            }
        }
    }
}

#[embassy_executor::task]
async fn usb_task(
    mut usb: embassy_usb::UsbDevice<'static, Driver<'static, hal::peripherals::USB>>,
) {
    usb.run().await;
}
