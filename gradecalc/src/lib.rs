#![forbid(unsafe_code)]

pub mod application;

pub mod presentation {
    pub mod cli;
}
