mod artifact;
mod trim;
mod trimmer;
