//! virsh-ss - type strings into libvirt domains
//!
//! This crate translates text into Linux input keycode names and delivers
//! them to a virtual machine through `virsh send-key`, batching characters
//! that share a shift state into as few invocations as allowed.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Keymap, batching translator, value objects, and errors
//! - **Application**: The send use case and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (virsh, dry run, config file)
//! - **CLI**: Command-line interface, prompt, and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
