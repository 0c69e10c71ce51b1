use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // The commit sha and the compiling target are appended to `lockstep --version`.
    vergen_gitcl::Emitter::default()
        .add_instructions(
            &vergen_gitcl::CargoBuilder::default()
                .target_triple(true)
                .build()?,
        )?
        .add_instructions(&vergen_gitcl::GitclBuilder::default().sha(true).build()?)?
        .emit()?;
    Ok(())
}
