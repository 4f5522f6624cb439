mod region;
mod selector;
