//! # Catalog Store
//!
//! The static, read-only list of products, categories and brands.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Process start ──► Catalog::seeded() ──► shared read-only for life      │
//! │                                                                         │
//! │  No mutation API. Every listing is in insertion order, which is also   │
//! │  the "popularity" order the query engine sorts by.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Seed Data
//! An electronics-components catalog across six categories:
//! development boards, sensors, motors & drivers, displays, wireless
//! modules, power. Category product counts are derived from the product
//! table, so they can never drift from it.

use std::collections::BTreeMap;

use crate::money::Money;
use crate::types::{Brand, Category, Product};

/// Number of products on the home page "featured" shelf.
pub const FEATURED_SHELF_LEN: usize = 8;
/// Number of products on the home page "trending" shelf.
pub const TRENDING_SHELF_LEN: usize = 8;
/// Number of products on the "deals of the day" shelf.
pub const DEALS_SHELF_LEN: usize = 4;
/// Number of related products shown on a product page.
pub const RELATED_LEN: usize = 4;

// =============================================================================
// Catalog
// =============================================================================

/// An immutable catalog loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    categories: Vec<Category>,
    brands: Vec<Brand>,
}

impl Catalog {
    /// Builds a catalog from explicit records.
    pub fn new(products: Vec<Product>, categories: Vec<Category>, brands: Vec<Brand>) -> Self {
        Catalog {
            products,
            categories,
            brands,
        }
    }

    /// Builds the built-in demo catalog.
    pub fn seeded() -> Self {
        let products: Vec<Product> = PRODUCTS.iter().map(ProductSeed::to_product).collect();

        let categories = CATEGORIES
            .iter()
            .enumerate()
            .map(|(idx, (name, slug, subcategories))| Category {
                id: (idx + 1).to_string(),
                name: name.to_string(),
                slug: slug.to_string(),
                image: format!("https://picsum.photos/seed/{}/400", slug),
                product_count: products.iter().filter(|p| p.category == *name).count() as u32,
                subcategories: subcategories.iter().map(|s| s.to_string()).collect(),
            })
            .collect();

        let brands = BRANDS
            .iter()
            .enumerate()
            .map(|(idx, (name, slug))| Brand {
                id: (idx + 1).to_string(),
                name: name.to_string(),
                slug: slug.to_string(),
                logo: format!("https://picsum.photos/seed/{}/100", slug),
            })
            .collect();

        Catalog::new(products, categories, brands)
    }

    /// The full product list in insertion order.
    pub fn list(&self) -> &[Product] {
        &self.products
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn brands(&self) -> &[Brand] {
        &self.brands
    }

    pub fn product_by_id(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn product_by_slug(&self, slug: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.slug == slug)
    }

    pub fn category_by_slug(&self, slug: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.slug == slug)
    }

    pub fn brand_by_slug(&self, slug: &str) -> Option<&Brand> {
        self.brands.iter().find(|b| b.slug == slug)
    }

    // =========================================================================
    // Shelves
    // =========================================================================

    fn shelf(&self, keep: impl Fn(&Product) -> bool, limit: usize) -> Vec<Product> {
        self.products
            .iter()
            .filter(|p| keep(p))
            .take(limit)
            .cloned()
            .collect()
    }

    pub fn featured(&self, limit: usize) -> Vec<Product> {
        self.shelf(|p| p.featured, limit)
    }

    pub fn trending(&self, limit: usize) -> Vec<Product> {
        self.shelf(|p| p.trending, limit)
    }

    pub fn deals_of_day(&self, limit: usize) -> Vec<Product> {
        self.shelf(|p| p.deal_of_day, limit)
    }

    /// Products in the same category, excluding `product` itself.
    pub fn related(&self, product: &Product, limit: usize) -> Vec<Product> {
        self.shelf(
            |p| p.category == product.category && p.id != product.id,
            limit,
        )
    }
}

// =============================================================================
// Seed Tables
// =============================================================================

/// (name, slug)
const BRANDS: &[(&str, &str)] = &[
    ("Arduino", "arduino"),
    ("Raspberry Pi", "raspberry-pi"),
    ("Adafruit", "adafruit"),
    ("SparkFun", "sparkfun"),
    ("Seeed Studio", "seeed-studio"),
    ("DFRobot", "dfrobot"),
    ("Pololu", "pololu"),
    ("Texas Instruments", "texas-instruments"),
    ("STMicroelectronics", "stm"),
    ("Espressif", "espressif"),
];

/// (name, slug, subcategories)
const CATEGORIES: &[(&str, &str, &[&str])] = &[
    (
        "Development Boards",
        "development-boards",
        &["Microcontrollers", "Single Board Computers"],
    ),
    ("Sensors", "sensors", &["Environmental", "Distance", "Motion"]),
    (
        "Motors & Drivers",
        "motors-drivers",
        &["Servos", "Steppers", "Drivers"],
    ),
    ("Displays", "displays", &["OLED", "LCD"]),
    (
        "Wireless Modules",
        "wireless-modules",
        &["WiFi & Bluetooth", "RF"],
    ),
    ("Power", "power", &["Regulators", "Batteries"]),
];

struct ProductSeed {
    id: &'static str,
    name: &'static str,
    slug: &'static str,
    brand: &'static str,
    category: &'static str,
    subcategory: &'static str,
    price: i64,
    original_price: Option<i64>,
    rating: f64,
    reviews_count: u32,
    stock: u32,
    description: &'static str,
    tags: &'static [&'static str],
    specs: &'static [(&'static str, &'static str)],
    featured: bool,
    trending: bool,
    deal_of_day: bool,
}

impl ProductSeed {
    fn to_product(&self) -> Product {
        let price = Money::from_units(self.price);
        let original_price = self.original_price.map(Money::from_units);
        let discount = match crate::query::discount_percent(original_price, price) {
            0 => None,
            pct => Some(pct),
        };

        Product {
            id: self.id.to_string(),
            slug: self.slug.to_string(),
            name: self.name.to_string(),
            brand: self.brand.to_string(),
            category: self.category.to_string(),
            subcategory: self.subcategory.to_string(),
            price,
            original_price,
            discount,
            images: (1..=3)
                .map(|n| format!("https://picsum.photos/seed/{}-{}/600", self.slug, n))
                .collect(),
            rating: self.rating,
            reviews_count: self.reviews_count,
            stock: self.stock,
            description: self.description.to_string(),
            specs: self
                .specs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<BTreeMap<_, _>>(),
            tags: self.tags.iter().map(|t| t.to_string()).collect(),
            featured: self.featured,
            trending: self.trending,
            deal_of_day: self.deal_of_day,
        }
    }
}

const PRODUCTS: &[ProductSeed] = &[
    ProductSeed {
        id: "1",
        name: "Arduino Uno R3",
        slug: "arduino-uno-r3",
        brand: "Arduino",
        category: "Development Boards",
        subcategory: "Microcontrollers",
        price: 1299,
        original_price: Some(1499),
        rating: 4.7,
        reviews_count: 842,
        stock: 45,
        description: "The classic ATmega328P board for learning and prototyping.",
        tags: &["arduino", "atmega328p", "beginner", "microcontroller"],
        specs: &[("Microcontroller", "ATmega328P"), ("Operating Voltage", "5V"), ("Digital I/O", "14")],
        featured: true,
        trending: true,
        deal_of_day: false,
    },
    ProductSeed {
        id: "2",
        name: "Raspberry Pi 4 Model B (4GB)",
        slug: "raspberry-pi-4-model-b-4gb",
        brand: "Raspberry Pi",
        category: "Development Boards",
        subcategory: "Single Board Computers",
        price: 5499,
        original_price: Some(5999),
        rating: 4.8,
        reviews_count: 1203,
        stock: 12,
        description: "Quad-core Cortex-A72 single board computer with dual 4K output.",
        tags: &["raspberry pi", "linux", "sbc", "iot"],
        specs: &[("CPU", "Cortex-A72 1.5GHz"), ("RAM", "4GB LPDDR4"), ("USB", "2x USB 3.0")],
        featured: true,
        trending: true,
        deal_of_day: false,
    },
    ProductSeed {
        id: "3",
        name: "ESP32 DevKitC",
        slug: "esp32-devkitc",
        brand: "Espressif",
        category: "Wireless Modules",
        subcategory: "WiFi & Bluetooth",
        price: 549,
        original_price: Some(699),
        rating: 4.6,
        reviews_count: 655,
        stock: 120,
        description: "Dual-core WiFi and Bluetooth development board.",
        tags: &["esp32", "wifi", "bluetooth", "iot"],
        specs: &[("Flash", "4MB"), ("WiFi", "802.11 b/g/n"), ("Bluetooth", "4.2 + BLE")],
        featured: false,
        trending: true,
        deal_of_day: true,
    },
    ProductSeed {
        id: "4",
        name: "Arduino Nano Every",
        slug: "arduino-nano-every",
        brand: "Arduino",
        category: "Development Boards",
        subcategory: "Microcontrollers",
        price: 899,
        original_price: None,
        rating: 4.5,
        reviews_count: 210,
        stock: 0,
        description: "Breadboard-friendly ATmega4809 board in the Nano footprint.",
        tags: &["arduino", "nano", "atmega4809"],
        specs: &[("Microcontroller", "ATmega4809"), ("Operating Voltage", "5V")],
        featured: false,
        trending: false,
        deal_of_day: false,
    },
    ProductSeed {
        id: "5",
        name: "STM32 Nucleo-F401RE",
        slug: "stm32-nucleo-f401re",
        brand: "STMicroelectronics",
        category: "Development Boards",
        subcategory: "Microcontrollers",
        price: 1899,
        original_price: Some(2199),
        rating: 4.4,
        reviews_count: 98,
        stock: 20,
        description: "Cortex-M4 board with on-board ST-LINK debugger.",
        tags: &["stm32", "arm", "cortex-m4", "nucleo"],
        specs: &[("Core", "Cortex-M4 84MHz"), ("Flash", "512KB")],
        featured: false,
        trending: false,
        deal_of_day: false,
    },
    ProductSeed {
        id: "6",
        name: "DHT22 Temperature & Humidity Sensor",
        slug: "dht22-temperature-humidity-sensor",
        brand: "Adafruit",
        category: "Sensors",
        subcategory: "Environmental",
        price: 349,
        original_price: Some(399),
        rating: 4.3,
        reviews_count: 512,
        stock: 200,
        description: "Calibrated digital temperature and humidity sensor.",
        tags: &["dht22", "temperature", "humidity", "weather"],
        specs: &[("Range", "-40 to 80°C"), ("Accuracy", "±0.5°C")],
        featured: false,
        trending: false,
        deal_of_day: true,
    },
    ProductSeed {
        id: "7",
        name: "HC-SR04 Ultrasonic Distance Sensor",
        slug: "hc-sr04-ultrasonic-sensor",
        brand: "SparkFun",
        category: "Sensors",
        subcategory: "Distance",
        price: 99,
        original_price: None,
        rating: 4.1,
        reviews_count: 1450,
        stock: 500,
        description: "Non-contact ranging from 2cm to 400cm.",
        tags: &["ultrasonic", "distance", "robotics"],
        specs: &[("Range", "2-400cm"), ("Operating Voltage", "5V")],
        featured: true,
        trending: false,
        deal_of_day: false,
    },
    ProductSeed {
        id: "8",
        name: "MPU6050 6-Axis IMU",
        slug: "mpu6050-6-axis-imu",
        brand: "DFRobot",
        category: "Sensors",
        subcategory: "Motion",
        price: 249,
        original_price: Some(299),
        rating: 4.2,
        reviews_count: 389,
        stock: 75,
        description: "3-axis gyroscope plus 3-axis accelerometer over I2C.",
        tags: &["imu", "gyroscope", "accelerometer", "i2c"],
        specs: &[("Interface", "I2C"), ("Gyro Range", "±250 to ±2000°/s")],
        featured: false,
        trending: true,
        deal_of_day: false,
    },
    ProductSeed {
        id: "9",
        name: "L298N Dual H-Bridge Motor Driver",
        slug: "l298n-motor-driver",
        brand: "Pololu",
        category: "Motors & Drivers",
        subcategory: "Drivers",
        price: 199,
        original_price: Some(249),
        rating: 4.0,
        reviews_count: 640,
        stock: 150,
        description: "Drives two DC motors or one stepper up to 2A per channel.",
        tags: &["motor driver", "h-bridge", "robotics"],
        specs: &[("Channels", "2"), ("Max Current", "2A")],
        featured: false,
        trending: false,
        deal_of_day: true,
    },
    ProductSeed {
        id: "10",
        name: "SG90 Micro Servo",
        slug: "sg90-micro-servo",
        brand: "Seeed Studio",
        category: "Motors & Drivers",
        subcategory: "Servos",
        price: 149,
        original_price: None,
        rating: 4.2,
        reviews_count: 980,
        stock: 300,
        description: "9g servo with 180° rotation for light-duty mechanisms.",
        tags: &["servo", "robotics", "rc"],
        specs: &[("Torque", "1.8kg·cm"), ("Rotation", "180°")],
        featured: false,
        trending: true,
        deal_of_day: false,
    },
    ProductSeed {
        id: "11",
        name: "NEMA 17 Stepper Motor",
        slug: "nema-17-stepper-motor",
        brand: "Pololu",
        category: "Motors & Drivers",
        subcategory: "Steppers",
        price: 899,
        original_price: Some(1099),
        rating: 4.5,
        reviews_count: 156,
        stock: 8,
        description: "1.8° bipolar stepper, the 3D-printer workhorse.",
        tags: &["stepper", "3d printer", "cnc"],
        specs: &[("Step Angle", "1.8°"), ("Holding Torque", "45N·cm")],
        featured: false,
        trending: false,
        deal_of_day: false,
    },
    ProductSeed {
        id: "12",
        name: "0.96\" OLED Display SSD1306",
        slug: "oled-display-ssd1306",
        brand: "Adafruit",
        category: "Displays",
        subcategory: "OLED",
        price: 299,
        original_price: Some(349),
        rating: 4.6,
        reviews_count: 720,
        stock: 90,
        description: "128x64 monochrome OLED over I2C.",
        tags: &["oled", "display", "i2c", "ssd1306"],
        specs: &[("Resolution", "128x64"), ("Interface", "I2C")],
        featured: true,
        trending: false,
        deal_of_day: false,
    },
    ProductSeed {
        id: "13",
        name: "16x2 LCD with I2C Backpack",
        slug: "lcd-16x2-i2c",
        brand: "DFRobot",
        category: "Displays",
        subcategory: "LCD",
        price: 229,
        original_price: None,
        rating: 4.1,
        reviews_count: 433,
        stock: 0,
        description: "Character LCD with a pre-soldered PCF8574 backpack.",
        tags: &["lcd", "display", "i2c"],
        specs: &[("Characters", "16x2"), ("Backlight", "Blue")],
        featured: false,
        trending: false,
        deal_of_day: false,
    },
    ProductSeed {
        id: "14",
        name: "nRF24L01+ Wireless Transceiver",
        slug: "nrf24l01-transceiver",
        brand: "SparkFun",
        category: "Wireless Modules",
        subcategory: "RF",
        price: 179,
        original_price: None,
        rating: 3.9,
        reviews_count: 301,
        stock: 140,
        description: "2.4GHz transceiver for low-power point-to-point links.",
        tags: &["rf", "2.4ghz", "wireless"],
        specs: &[("Frequency", "2.4GHz"), ("Data Rate", "2Mbps")],
        featured: false,
        trending: false,
        deal_of_day: false,
    },
    ProductSeed {
        id: "15",
        name: "LM2596 Buck Converter",
        slug: "lm2596-buck-converter",
        brand: "Texas Instruments",
        category: "Power",
        subcategory: "Regulators",
        price: 129,
        original_price: Some(159),
        rating: 4.3,
        reviews_count: 512,
        stock: 250,
        description: "Adjustable step-down regulator, 3A output.",
        tags: &["regulator", "buck", "power supply"],
        specs: &[("Input", "4-40V"), ("Output", "1.25-37V")],
        featured: false,
        trending: false,
        deal_of_day: true,
    },
    ProductSeed {
        id: "16",
        name: "Seeed XIAO ESP32C3",
        slug: "seeed-xiao-esp32c3",
        brand: "Seeed Studio",
        category: "Development Boards",
        subcategory: "Microcontrollers",
        price: 699,
        original_price: Some(799),
        rating: 4.7,
        reviews_count: 88,
        stock: 35,
        description: "Thumb-sized RISC-V board with WiFi and BLE 5.",
        tags: &["esp32", "risc-v", "wifi", "xiao"],
        specs: &[("Core", "RISC-V 160MHz"), ("Flash", "4MB")],
        featured: true,
        trending: false,
        deal_of_day: false,
    },
];

// =============================================================================
// Unit Tests
// =============================================================================
