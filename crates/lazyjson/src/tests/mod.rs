mod arbitrary;
mod mutation;
