mod enrollment;
