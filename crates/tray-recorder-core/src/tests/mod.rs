mod capture;
mod encoder;
mod export;
mod session;
