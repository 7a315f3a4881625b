pub mod game;
pub mod notice;
pub mod render;

#[cfg(test)]
mod test;
